use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Span {
    pub file: String,
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub col: u32,
}

impl Span {
    pub fn new(file: impl Into<String>, start: u32, end: u32, line: u32, col: u32) -> Self {
        Self {
            file: file.into(),
            start,
            end,
            line,
            col,
        }
    }

    /// Zero-width span at `offset`, used for pure insertions.
    pub fn insertion_point(file: impl Into<String>, offset: u32, line: u32, col: u32) -> Self {
        Self::new(file, offset, offset, line, col)
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::Span;

    #[test]
    fn containment_requires_same_file() {
        let outer = Span::new("src/a.cs", 10, 40, 2, 1);
        let inner = Span::new("src/a.cs", 15, 20, 2, 6);
        let other_file = Span::new("src/b.cs", 15, 20, 2, 6);

        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&other_file));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn insertion_points_are_empty() {
        let point = Span::insertion_point("src/a.cs", 12, 3, 1);
        assert!(point.is_empty());
        assert_eq!(point.len(), 0);
        assert_eq!(point.start, point.end);
    }
}
