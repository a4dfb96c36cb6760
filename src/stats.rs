use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Rows shown per table page.
pub const PAGE_SIZE: usize = 30;

/// One row of `GET /api/statistics`. Any numeric column may come back `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Passing Yards", default)]
    pub passing_yards: Option<f64>,
    #[serde(rename = "Passing TDs", default)]
    pub passing_tds: Option<f64>,
    #[serde(rename = "Interceptions", default)]
    pub interceptions: Option<f64>,
    #[serde(rename = "Rushing Yards", default)]
    pub rushing_yards: Option<f64>,
    #[serde(rename = "Rushing TDs", default)]
    pub rushing_tds: Option<f64>,
    #[serde(rename = "Receptions", default)]
    pub receptions: Option<f64>,
    #[serde(rename = "Receiving Yards", default)]
    pub receiving_yards: Option<f64>,
    #[serde(rename = "Receiving TDs", default)]
    pub receiving_tds: Option<f64>,
    #[serde(rename = "Fumbles", default)]
    pub fumbles: Option<f64>,
    #[serde(rename = "Fantasy PPR Points", default)]
    pub fantasy_ppr: Option<f64>,
    #[serde(rename = "Fantasy Non-PPR Points", default)]
    pub fantasy_non_ppr: Option<f64>,
}

impl PlayerStatRecord {
    pub fn named(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            passing_yards: None,
            passing_tds: None,
            interceptions: None,
            rushing_yards: None,
            rushing_tds: None,
            receptions: None,
            receiving_yards: None,
            receiving_tds: None,
            fumbles: None,
            fantasy_ppr: None,
            fantasy_non_ppr: None,
        }
    }

    pub fn get(&self, field: StatField) -> Option<f64> {
        match field {
            StatField::PassingYards => self.passing_yards,
            StatField::PassingTds => self.passing_tds,
            StatField::Interceptions => self.interceptions,
            StatField::RushingYards => self.rushing_yards,
            StatField::RushingTds => self.rushing_tds,
            StatField::Receptions => self.receptions,
            StatField::ReceivingYards => self.receiving_yards,
            StatField::ReceivingTds => self.receiving_tds,
            StatField::Fumbles => self.fumbles,
            StatField::FantasyPpr => self.fantasy_ppr,
            StatField::FantasyNonPpr => self.fantasy_non_ppr,
        }
    }

    pub fn set(&mut self, field: StatField, value: Option<f64>) {
        let slot = match field {
            StatField::PassingYards => &mut self.passing_yards,
            StatField::PassingTds => &mut self.passing_tds,
            StatField::Interceptions => &mut self.interceptions,
            StatField::RushingYards => &mut self.rushing_yards,
            StatField::RushingTds => &mut self.rushing_tds,
            StatField::Receptions => &mut self.receptions,
            StatField::ReceivingYards => &mut self.receiving_yards,
            StatField::ReceivingTds => &mut self.receiving_tds,
            StatField::Fumbles => &mut self.fumbles,
            StatField::FantasyPpr => &mut self.fantasy_ppr,
            StatField::FantasyNonPpr => &mut self.fantasy_non_ppr,
        };
        *slot = value;
    }

    /// Value used for ordering and totals: missing counts as zero.
    pub fn value_or_zero(&self, field: StatField) -> f64 {
        self.get(field).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    PassingYards,
    PassingTds,
    Interceptions,
    RushingYards,
    RushingTds,
    Receptions,
    ReceivingYards,
    ReceivingTds,
    Fumbles,
    FantasyPpr,
    FantasyNonPpr,
}

impl StatField {
    pub const ALL: [StatField; 11] = [
        StatField::PassingYards,
        StatField::PassingTds,
        StatField::Interceptions,
        StatField::RushingYards,
        StatField::RushingTds,
        StatField::Receptions,
        StatField::ReceivingYards,
        StatField::ReceivingTds,
        StatField::Fumbles,
        StatField::FantasyPpr,
        StatField::FantasyNonPpr,
    ];

    /// Column key as it appears on the wire.
    pub fn label(self) -> &'static str {
        match self {
            StatField::PassingYards => "Passing Yards",
            StatField::PassingTds => "Passing TDs",
            StatField::Interceptions => "Interceptions",
            StatField::RushingYards => "Rushing Yards",
            StatField::RushingTds => "Rushing TDs",
            StatField::Receptions => "Receptions",
            StatField::ReceivingYards => "Receiving Yards",
            StatField::ReceivingTds => "Receiving TDs",
            StatField::Fumbles => "Fumbles",
            StatField::FantasyPpr => "Fantasy PPR Points",
            StatField::FantasyNonPpr => "Fantasy Non-PPR Points",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            StatField::PassingYards => "PassYds",
            StatField::PassingTds => "PassTD",
            StatField::Interceptions => "Int",
            StatField::RushingYards => "RushYds",
            StatField::RushingTds => "RushTD",
            StatField::Receptions => "Rec",
            StatField::ReceivingYards => "RecYds",
            StatField::ReceivingTds => "RecTD",
            StatField::Fumbles => "Fum",
            StatField::FantasyPpr => "PPR Pts",
            StatField::FantasyNonPpr => "Std Pts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: StatField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: StatField::FantasyPpr,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Header click semantics: an ascending column flips to descending, anything
    /// else (a new column, or a descending one) sorts ascending.
    pub fn toggled(self, field: StatField) -> SortSpec {
        let direction = if self.field == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortSpec { field, direction }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringView {
    Ppr,
    NonPpr,
}

impl ScoringView {
    pub fn scoring_field(self) -> StatField {
        match self {
            ScoringView::Ppr => StatField::FantasyPpr,
            ScoringView::NonPpr => StatField::FantasyNonPpr,
        }
    }

    /// Columns visible in this view, in display order. Only the active fantasy
    /// column is shown.
    pub fn columns(self) -> [StatField; 10] {
        [
            StatField::PassingYards,
            StatField::PassingTds,
            StatField::Interceptions,
            StatField::RushingYards,
            StatField::RushingTds,
            StatField::Receptions,
            StatField::ReceivingYards,
            StatField::ReceivingTds,
            StatField::Fumbles,
            self.scoring_field(),
        ]
    }
}

pub fn sort_records<'a>(
    records: &'a [PlayerStatRecord],
    sort: SortSpec,
) -> Vec<&'a PlayerStatRecord> {
    let mut sorted: Vec<&PlayerStatRecord> = records.iter().collect();
    // `sort_by` is stable, so equal values keep their fetched order.
    sorted.sort_by(|a, b| {
        let va = a.value_or_zero(sort.field);
        let vb = b.value_or_zero(sort.field);
        let ord = match sort.direction {
            SortDirection::Asc => va.partial_cmp(&vb),
            SortDirection::Desc => vb.partial_cmp(&va),
        };
        ord.unwrap_or(Ordering::Equal)
    });
    sorted
}

pub fn filter_records<'a>(
    records: &[&'a PlayerStatRecord],
    search: &str,
) -> Vec<&'a PlayerStatRecord> {
    if search.is_empty() {
        return records.to_vec();
    }
    let query = search.to_lowercase();
    records
        .iter()
        .copied()
        .filter(|r| r.player.to_lowercase().contains(&query))
        .collect()
}

/// 1-based page window into `items`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

pub fn format_stat(value: Option<f64>) -> String {
    format!("{:.3}", value.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, ppr: Option<f64>) -> PlayerStatRecord {
        let mut r = PlayerStatRecord::named(name);
        r.fantasy_ppr = ppr;
        r
    }

    #[test]
    fn toggled_flips_only_ascending_same_column() {
        let asc = SortSpec {
            field: StatField::Fumbles,
            direction: SortDirection::Asc,
        };
        assert_eq!(asc.toggled(StatField::Fumbles).direction, SortDirection::Desc);
        assert_eq!(
            asc.toggled(StatField::Receptions),
            SortSpec {
                field: StatField::Receptions,
                direction: SortDirection::Asc
            }
        );
        let desc = SortSpec::default();
        assert_eq!(
            desc.toggled(StatField::FantasyPpr).direction,
            SortDirection::Asc
        );
    }

    #[test]
    fn missing_values_sort_as_zero() {
        let records = vec![rec("A", Some(2.0)), rec("B", None), rec("C", Some(-1.0))];
        let sorted = sort_records(
            &records,
            SortSpec {
                field: StatField::FantasyPpr,
                direction: SortDirection::Asc,
            },
        );
        let names: Vec<&str> = sorted.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[test]
    fn ties_keep_fetched_order() {
        let records = vec![rec("A", Some(1.0)), rec("B", None), rec("C", Some(1.0))];
        let sorted = sort_records(&records, SortSpec::default());
        let names: Vec<&str> = sorted.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, ["A", "C", "B"]);
    }

    #[test]
    fn paginate_handles_bounds() {
        let items: Vec<usize> = (0..65).collect();
        assert_eq!(paginate(&items, 1).len(), 30);
        assert_eq!(paginate(&items, 3), &[60usize, 61, 62, 63, 64]);
        assert!(paginate(&items, 0).is_empty());
        assert!(paginate(&items, 4).is_empty());
        assert_eq!(page_count(items.len()), 3);
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(30), 1);
    }

    #[test]
    fn format_stat_uses_three_decimals() {
        assert_eq!(format_stat(None), "0.000");
        assert_eq!(format_stat(Some(12.34567)), "12.346");
    }
}
