use super::layout::Layout;
use super::raw_table::RawTable;

/// Header token marking the out-of-course layout.
const COURSE_HEADER: &str = "INSEGNAMENTO";

/// Out-of-course tables name a column "Insegnamento".
pub fn is_out_of_course(header: &[String]) -> bool {
    header
        .iter()
        .any(|cell| cell.to_uppercase().contains(COURSE_HEADER))
}

/// Regular tables have a subject column plus at least one month column, and
/// never carry the out-of-course signature.
pub fn is_regular(header: &[String]) -> bool {
    header.len() >= 2
        && !header[0].to_uppercase().contains(COURSE_HEADER)
        && !is_out_of_course(header)
}

/// Whether `table` should be consumed by the `layout` pass.
pub fn matches(layout: Layout, table: &RawTable) -> bool {
    classify(table) == Some(layout)
}

/// Label a table by its header row; `None` means ignore it.
pub fn classify(table: &RawTable) -> Option<Layout> {
    let header = table.header()?;
    if header.iter().all(String::is_empty) {
        return None;
    }
    if is_out_of_course(&header) {
        Some(Layout::OutOfCourse)
    } else if is_regular(&header) {
        Some(Layout::Regular)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insegnamento_header_is_out_of_course_only() {
        let table = RawTable::from_strings(vec![vec!["Insegnamento", "1ª data", "2ª data"]]);
        assert_eq!(classify(&table), Some(Layout::OutOfCourse));
        assert!(matches(Layout::OutOfCourse, &table));
        assert!(!matches(Layout::Regular, &table));
    }

    #[test]
    fn test_month_header_is_regular() {
        let table = RawTable::from_strings(vec![vec!["Materia", "Gennaio 2026", "Febbraio 2026"]]);
        assert_eq!(classify(&table), Some(Layout::Regular));
    }

    #[test]
    fn test_wrapped_header_cell_is_normalized() {
        let table = RawTable::from_strings(vec![vec!["Docente", "INSEGNA\nMENTO", "Data"]]);
        assert_eq!(classify(&table), Some(Layout::Regular));
        let table = RawTable::from_strings(vec![vec!["  insegnamento\n", "Data"]]);
        assert_eq!(classify(&table), Some(Layout::OutOfCourse));
    }

    #[test]
    fn test_ignored_tables() {
        assert_eq!(classify(&RawTable::default()), None);
        assert_eq!(classify(&RawTable::new(vec![vec![]])), None);
        assert_eq!(classify(&RawTable::new(vec![vec![None, None]])), None);
        assert_eq!(classify(&RawTable::from_strings(vec![vec!["Materia"]])), None);
    }
}
