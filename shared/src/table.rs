/// A collection fetched for one of the admin tables.
#[derive(Debug, Clone, PartialEq)]
pub enum TableState<T> {
    Loading,
    Failed(String),
    Loaded(Vec<T>),
}

impl<T> TableState<T> {
    pub fn rows(&self) -> Option<&[T]> {
        match self {
            TableState::Loaded(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn rows_mut(&mut self) -> Option<&mut Vec<T>> {
        match self {
            TableState::Loaded(rows) => Some(rows),
            _ => None,
        }
    }

    /// Records a failed fetch. Rows already on screen stay, and the message
    /// is handed back for the caller to show elsewhere.
    pub fn fail(&mut self, message: String) -> Option<String> {
        if self.rows().is_some() {
            return Some(message);
        }
        *self = TableState::Failed(message);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_before_first_load_shows_in_the_table() {
        let mut table: TableState<u32> = TableState::Loading;
        assert_eq!(table.fail("Failed to load users.".into()), None);
        assert_eq!(table, TableState::Failed("Failed to load users.".into()));
        assert!(table.rows().is_none());
    }

    #[test]
    fn failed_refetch_keeps_loaded_rows() {
        let mut table = TableState::Loaded(vec![1, 2]);
        assert_eq!(table.fail("Server error".into()), Some("Server error".to_string()));
        assert_eq!(table.rows(), Some(&[1, 2][..]));
    }

    #[test]
    fn only_loaded_tables_expose_rows() {
        let mut failed: TableState<u32> = TableState::Failed("boom".into());
        assert!(failed.rows_mut().is_none());

        let mut loaded = TableState::Loaded(vec![3]);
        if let Some(rows) = loaded.rows_mut() {
            rows.push(4);
        }
        assert_eq!(loaded.rows(), Some(&[3, 4][..]));
    }
}
