// src/bin/exams.rs
//
// Query the exam database and export it to iCalendar.

use anyhow::Result;
use examscraper::{
    calendar,
    config::{next_value, Config},
    store::{ExamStore, StoredExam},
};
use std::{env, path::PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "\
usage: exams [--db FILE] [--list] [--search SUBJECT] [--ics] [--output FILE]

  --list             show every exam
  --search SUBJECT   show exams whose subject contains SUBJECT
  --ics              export all exams (or the --search subset) to a .ics file
  --output FILE      calendar file name (default: esami.ics)";

#[derive(Debug)]
struct Params {
    db_path: PathBuf,
    list: bool,
    search: Option<String>,
    ics: bool,
    output: PathBuf,
}

fn parse_args(db_path: PathBuf, args: impl IntoIterator<Item = String>) -> Result<Params> {
    let mut params = Params {
        db_path,
        list: false,
        search: None,
        ics: false,
        output: PathBuf::from("esami.ics"),
    };
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--db" => params.db_path = next_value(&mut args, "--db")?.into(),
            "--list" => params.list = true,
            "--search" => params.search = Some(next_value(&mut args, "--search")?),
            "--ics" => params.ics = true,
            "--output" | "-o" => params.output = next_value(&mut args, "--output")?.into(),
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }
    Ok(params)
}

fn print_rows(rows: &[StoredExam], title: &str) {
    println!("\n{}", title);
    println!("\n{:<4} | {:<12} | {:<15} | {}", "ID", "Data", "Tipo", "Materia");
    println!("{:-<80}", "");
    for r in rows {
        println!(
            "{:<4} | {:<12} | {:<15} | {}",
            r.id, r.date, r.record_type, r.subject
        );
    }
    println!("\nTotale esami trovati: {}", rows.len());
}

fn run(params: &Params) -> Result<()> {
    let store = ExamStore::open(&params.db_path)?;
    store.init_schema(false)?;

    if params.list {
        print_rows(&store.list_all()?, "Elenco completo appelli");
    } else if let Some(subject) = &params.search {
        let rows = store.search(subject)?;
        if rows.is_empty() {
            println!("\nNessun esame trovato per '{}'.", subject);
        } else {
            print_rows(&rows, &format!("Risultati per materia: {}", subject));
        }
    }

    if params.ics {
        let records = store.fetch_for_calendar(params.search.as_deref())?;
        if records.is_empty() {
            println!("Nessun esame da esportare.");
            return Ok(());
        }
        let exported = calendar::export(&records, &params.output)?;
        println!(
            "\nEsportati {} appelli nel file '{}'.",
            exported,
            params.output.display()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    if env::args().len() == 1 {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    let cfg = Config::from_env()?;
    let params = match parse_args(cfg.db_path, env::args().skip(1)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(1);
        }
    };
    run(&params)
}
