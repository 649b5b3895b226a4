//! Disambiguation: turn a list of candidates into at most one choice.
//!
//! Zero candidates is `NotFound`, one is picked automatically, and only a
//! genuinely ambiguous list reaches the interactive chooser.  The same
//! function picks vaults, secrets and subscriptions.

use tracing::debug;

use crate::errors::{AzqError, Result};

/// Outcome of a disambiguation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// There was nothing to choose from.
    NotFound,
    /// There were candidates but the operator chose none of them.
    Declined,
    /// Exactly one item, either unique or picked by the operator.
    Selected(T),
}

impl<T> Resolution<T> {
    pub fn selected(self) -> Option<T> {
        match self {
            Self::Selected(item) => Some(item),
            Self::NotFound | Self::Declined => None,
        }
    }

    pub fn as_ref(&self) -> Resolution<&T> {
        match self {
            Self::NotFound => Resolution::NotFound,
            Self::Declined => Resolution::Declined,
            Self::Selected(item) => Resolution::Selected(item),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::NotFound => Resolution::NotFound,
            Self::Declined => Resolution::Declined,
            Self::Selected(item) => Resolution::Selected(f(item)),
        }
    }
}

/// Asks the operator to pick one entry from a titled list.
pub trait Chooser {
    /// Returns the index of the chosen label, or `None` if the operator aborted.
    fn choose(&mut self, title: &str, labels: &[String]) -> Result<Option<usize>>;
}

impl<C: Chooser + ?Sized> Chooser for &mut C {
    fn choose(&mut self, title: &str, labels: &[String]) -> Result<Option<usize>> {
        (**self).choose(title, labels)
    }
}

/// Reduce `candidates` (already in display order) to a single item.
pub fn resolve<T, C>(
    title: &str,
    mut candidates: Vec<T>,
    label: impl Fn(&T) -> String,
    chooser: &mut C,
) -> Result<Resolution<T>>
where
    C: Chooser + ?Sized,
{
    let count = candidates.len();
    match count {
        0 => {
            debug!(title, "nothing to choose from");
            Ok(Resolution::NotFound)
        }
        1 => {
            debug!(title, "single candidate, selecting automatically");
            Ok(Resolution::Selected(candidates.swap_remove(0)))
        }
        _ => {
            let labels: Vec<String> = candidates.iter().map(&label).collect();
            debug!(title, count, "asking operator to choose");
            match chooser.choose(title, &labels)? {
                None => Ok(Resolution::Declined),
                Some(index) if index < count => {
                    Ok(Resolution::Selected(candidates.swap_remove(index)))
                }
                Some(index) => Err(AzqError::InvalidChoice { index, count }),
            }
        }
    }
}
