//! Flattening of grouped sections into a single virtualizable row list.

use serde::Serialize;

use super::Section;

/// One renderable unit of the combined list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Row {
    /// Header image, row 0 when present
    Header,
    /// The sticky category tabs row
    TabsBar,
    SectionHeader { section: usize },
    Item { section: usize, item: usize },
}

impl Row {
    /// Section this row belongs to, if any
    pub fn section(&self) -> Option<usize> {
        match *self {
            Row::SectionHeader { section } | Row::Item { section, .. } => Some(section),
            Row::Header | Row::TabsBar => None,
        }
    }

    pub fn is_section_header(&self) -> bool {
        matches!(self, Row::SectionHeader { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatRow {
    pub row: Row,
    /// Stable key for host-side diffing
    pub key: String,
}

/// Flattened rows plus the index tables derived from them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FlatRows {
    pub rows: Vec<FlatRow>,
    pub tabs_row: usize,
    /// Row index of each section's header, by section index
    pub section_header_rows: Vec<usize>,
}

impl FlatRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FlatRow> {
        self.rows.get(index)
    }

    pub fn row(&self, index: usize) -> Option<Row> {
        self.rows.get(index).map(|r| r.row)
    }

    pub fn has_header(&self) -> bool {
        self.tabs_row == 1
    }

    pub fn section_count(&self) -> usize {
        self.section_header_rows.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlatRow> {
        self.rows.iter()
    }
}

/// Build the row sequence `[Header?], TabsBar, (SectionHeader, Item*)*`.
///
/// Deterministic and O(total items). Keys derive from section ids, so they are
/// unique only when the ids are.
pub fn flatten<T>(sections: &[Section<T>], has_header: bool) -> FlatRows {
    let total = sections.iter().map(|s| 1 + s.data.len()).sum::<usize>() + 2;
    let mut rows = Vec::with_capacity(total);

    if has_header {
        rows.push(FlatRow {
            row: Row::Header,
            key: "HEADER".to_string(),
        });
    }

    let tabs_row = rows.len();
    rows.push(FlatRow {
        row: Row::TabsBar,
        key: "TABS".to_string(),
    });

    let mut section_header_rows = Vec::with_capacity(sections.len());
    for (s_idx, section) in sections.iter().enumerate() {
        section_header_rows.push(rows.len());
        rows.push(FlatRow {
            row: Row::SectionHeader { section: s_idx },
            key: format!("S-{}", section.id),
        });

        for i_idx in 0..section.data.len() {
            rows.push(FlatRow {
                row: Row::Item {
                    section: s_idx,
                    item: i_idx,
                },
                key: format!("S-{}-I-{}", section.id, i_idx),
            });
        }
    }

    FlatRows {
        rows,
        tabs_row,
        section_header_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(counts: &[usize]) -> Vec<Section<usize>> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                Section::new(format!("s{}", i), format!("Section {}", i), (0..n).collect())
            })
            .collect()
    }

    #[test]
    fn test_reference_catalog() {
        let flat = flatten(&sections(&[6, 8, 7]), true);
        assert_eq!(flat.len(), 26);
        assert_eq!(flat.tabs_row, 1);
        assert_eq!(flat.section_header_rows, vec![2, 9, 18]);
    }

    #[test]
    fn test_row_count_formula() {
        let cases: [&[usize]; 5] = [&[], &[0], &[3], &[1, 0, 5], &[2, 2, 2, 2]];
        for counts in cases {
            for has_header in [false, true] {
                let flat = flatten(&sections(counts), has_header);
                let h = usize::from(has_header);
                let expected = h + 1 + counts.iter().map(|k| 1 + k).sum::<usize>();
                assert_eq!(flat.len(), expected, "{:?} header={}", counts, has_header);
                assert_eq!(flat.tabs_row, h);
                assert_eq!(flat.section_header_rows.len(), counts.len());
                if let Some(&first) = flat.section_header_rows.first() {
                    assert_eq!(first, h + 1);
                }
                assert!(flat.section_header_rows.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_row_order_and_keys() {
        let flat = flatten(&sections(&[2, 1]), true);
        let rows: Vec<Row> = flat.iter().map(|r| r.row).collect();
        assert_eq!(
            rows,
            vec![
                Row::Header,
                Row::TabsBar,
                Row::SectionHeader { section: 0 },
                Row::Item { section: 0, item: 0 },
                Row::Item { section: 0, item: 1 },
                Row::SectionHeader { section: 1 },
                Row::Item { section: 1, item: 0 },
            ]
        );

        let keys: Vec<&str> = flat.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["HEADER", "TABS", "S-s0", "S-s0-I-0", "S-s0-I-1", "S-s1", "S-s1-I-0"]
        );
    }

    #[test]
    fn test_empty_sections() {
        let flat = flatten::<usize>(&[], false);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.row(0), Some(Row::TabsBar));
        assert_eq!(flat.section_count(), 0);
        assert!(!flat.has_header());
    }

    #[test]
    fn test_structurally_equal_inputs_are_stable() {
        let a = flatten(&sections(&[3, 4]), true);
        let b = flatten(&sections(&[3, 4]), true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_section() {
        assert_eq!(Row::Header.section(), None);
        assert_eq!(Row::TabsBar.section(), None);
        assert_eq!(Row::SectionHeader { section: 2 }.section(), Some(2));
        assert_eq!(Row::Item { section: 1, item: 4 }.section(), Some(1));
    }
}
