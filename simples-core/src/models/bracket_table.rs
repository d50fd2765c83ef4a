use std::borrow::Cow;

use rust_decimal::Decimal;
use thiserror::Error;

use super::bracket::Bracket;
use crate::display::format_brl;

/// Errors raised when a bracket table violates its construction invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    /// The table has no rows.
    #[error("bracket table is empty")]
    Empty,

    /// An upper limit is below zero.
    #[error("bracket {faixa} has a negative upper limit {limit}")]
    NegativeLimit { faixa: usize, limit: Decimal },

    /// Upper limits are not strictly increasing.
    #[error("bracket {faixa} upper limit {current} is not above the previous limit {previous}")]
    NotAscending {
        faixa: usize,
        previous: Decimal,
        current: Decimal,
    },
}

/// An ordered, non-empty sequence of brackets with strictly increasing
/// upper limits.
///
/// Lookups always resolve to exactly one bracket: revenue above the last
/// limit falls into the last bracket, which is therefore open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable<B>
where
    B: Clone + 'static,
{
    brackets: Cow<'static, [B]>,
}

/// The result of a bracket lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketMatch<'a, B> {
    /// 1-based bracket number.
    pub faixa: usize,
    pub bracket: &'a B,
    /// True when the revenue exceeded the last upper limit.
    pub open_ended: bool,
}

impl<B: Bracket> BracketMatch<'_, B> {
    /// Display label for the matched range, e.g. `"< R$ 360.000"`, or
    /// `"Máxima"` when the revenue is beyond the table.
    pub fn label(&self) -> String {
        if self.open_ended {
            return "Máxima".to_string();
        }
        let limit = self.bracket.upper_limit().normalize();
        format!("< R$ {}", format_brl(limit, limit.scale().min(2)))
    }
}

impl<B> BracketTable<B>
where
    B: Bracket + Clone + 'static,
{
    /// Builds a table from owned rows, checking the ordering invariants.
    pub fn new(brackets: Vec<B>) -> Result<Self, BracketTableError> {
        Self::check(&brackets)?;
        Ok(Self {
            brackets: Cow::Owned(brackets),
        })
    }

    /// Wraps a static slice without copying.
    ///
    /// Only emptiness can be checked in a const context; ordering of the
    /// built-in tables is pinned by their unit tests through [`Self::validate`].
    pub const fn from_static(brackets: &'static [B]) -> Self {
        assert!(!brackets.is_empty(), "bracket table is empty");
        Self {
            brackets: Cow::Borrowed(brackets),
        }
    }

    /// Re-checks the construction invariants.
    pub fn validate(&self) -> Result<(), BracketTableError> {
        Self::check(&self.brackets)
    }

    fn check(brackets: &[B]) -> Result<(), BracketTableError> {
        if brackets.is_empty() {
            return Err(BracketTableError::Empty);
        }

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in brackets.iter().enumerate() {
            let limit = bracket.upper_limit();
            if limit < Decimal::ZERO {
                return Err(BracketTableError::NegativeLimit {
                    faixa: index + 1,
                    limit,
                });
            }
            if let Some(previous) = previous {
                if limit <= previous {
                    return Err(BracketTableError::NotAscending {
                        faixa: index + 1,
                        previous,
                        current: limit,
                    });
                }
            }
            previous = Some(limit);
        }

        Ok(())
    }

    /// Finds the first bracket whose upper limit is `>= revenue`, falling
    /// back to the last bracket.
    pub fn find(&self, revenue: Decimal) -> BracketMatch<'_, B> {
        match self
            .brackets
            .iter()
            .position(|b| revenue <= b.upper_limit())
        {
            Some(index) => BracketMatch {
                faixa: index + 1,
                bracket: &self.brackets[index],
                open_ended: false,
            },
            None => {
                let index = self.brackets.len() - 1;
                BracketMatch {
                    faixa: index + 1,
                    bracket: &self.brackets[index],
                    open_ended: true,
                }
            }
        }
    }

    /// Returns the bracket with the given 1-based number.
    pub fn get(&self, faixa: usize) -> Option<&B> {
        faixa.checked_sub(1).and_then(|i| self.brackets.get(i))
    }

    pub fn as_slice(&self) -> &[B] {
        &self.brackets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, B> {
        self.brackets.iter()
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

impl<'a, B> IntoIterator for &'a BracketTable<B>
where
    B: Bracket + Clone + 'static,
{
    type Item = &'a B;
    type IntoIter = std::slice::Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
