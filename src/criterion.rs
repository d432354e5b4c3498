//! Drop criterion grammar.
//!
//! A criterion is either `random`/`rand` or `{indicator}_{order}` where
//! `order` is `small` or `large`. Keywords match case-insensitively; the
//! indicator keeps its case because it names the score file.

use crate::util::{SampleDropError, SampleDropResult};
use std::fmt;
use std::str::FromStr;

/// Which end of the score ordering gets dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropOrder {
    /// Drop the samples with the smallest scores.
    Small,
    /// Drop the samples with the largest scores.
    Large,
}

impl DropOrder {
    /// Lowercase keyword for this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            DropOrder::Small => "small",
            DropOrder::Large => "large",
        }
    }
}

impl FromStr for DropOrder {
    type Err = SampleDropError;

    fn from_str(s: &str) -> SampleDropResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(DropOrder::Small),
            "large" => Ok(DropOrder::Large),
            _ => Err(SampleDropError::InvalidDropOrder {
                order: s.to_owned(),
            }),
        }
    }
}

/// Parsed drop criterion.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropCriterion {
    /// Shuffle each class group and cut the band.
    Random,
    /// Rank each class group by a precomputed utility score.
    Score {
        /// Name of the utility indicator, used to locate the score file.
        indicator: String,
        /// Which end of the ranking to drop.
        order: DropOrder,
    },
}

impl DropCriterion {
    /// Builds a score criterion.
    pub fn score(indicator: impl Into<String>, order: DropOrder) -> Self {
        DropCriterion::Score {
            indicator: indicator.into(),
            order,
        }
    }

    /// Returns true for the random criterion.
    pub fn is_random(&self) -> bool {
        matches!(self, DropCriterion::Random)
    }
}

impl FromStr for DropCriterion {
    type Err = SampleDropError;

    fn from_str(s: &str) -> SampleDropResult<Self> {
        let lowered = s.to_ascii_lowercase();
        if lowered == "random" || lowered == "rand" {
            return Ok(DropCriterion::Random);
        }

        let mut parts = s.split('_');
        let (indicator, order) = match (parts.next(), parts.next(), parts.next()) {
            (Some(indicator), Some(order), None) => (indicator, order),
            _ => {
                return Err(SampleDropError::MalformedCriterion {
                    criterion: s.to_owned(),
                })
            }
        };
        let order = order.parse::<DropOrder>()?;
        Ok(DropCriterion::score(indicator, order))
    }
}

impl fmt::Display for DropCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropCriterion::Random => f.write_str("random"),
            DropCriterion::Score { indicator, order } => {
                write!(f, "{}_{}", indicator, order.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DropCriterion, DropOrder};
    use crate::util::SampleDropError;

    #[test]
    fn random_keywords_ignore_case() {
        for raw in ["random", "RAND", "Random", "rAnD"] {
            assert_eq!(raw.parse::<DropCriterion>(), Ok(DropCriterion::Random));
        }
    }

    #[test]
    fn score_criterion_keeps_indicator_case() {
        let parsed = "LossConverge_Small".parse::<DropCriterion>().unwrap();
        assert_eq!(parsed, DropCriterion::score("LossConverge", DropOrder::Small));
        assert_eq!(parsed.to_string(), "LossConverge_small");
    }

    #[test]
    fn wrong_part_count_is_malformed() {
        for raw in ["Loss", "Loss_large_extra", "randomly"] {
            assert_eq!(
                raw.parse::<DropCriterion>(),
                Err(SampleDropError::MalformedCriterion {
                    criterion: raw.to_owned(),
                })
            );
        }
    }

    #[test]
    fn unknown_order_is_rejected() {
        assert_eq!(
            "Loss_medium".parse::<DropCriterion>(),
            Err(SampleDropError::InvalidDropOrder {
                order: "medium".to_owned(),
            })
        );
    }
}
