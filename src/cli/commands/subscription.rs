//! `azq subscription list|set` — show subscriptions and switch the active one.

use crate::azure::{set_active_subscription, AzureClients};
use crate::cli::output;
use crate::cli::prompt::TerminalChooser;
use crate::cli::{load_settings, Cli};
use crate::errors::{AzqError, Result};
use crate::search::{resolve, Chooser, RankedCandidates, Resolution};
use crate::vault::{AccountDirectory, Subscription};

/// Execute `azq subscription list`.
pub fn execute_list(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let azure = AzureClients::from_settings(&settings);

    output::info("Fetching subscriptions from Azure...");
    let subscriptions = azure.directory.list_subscriptions()?;
    output::print_subscriptions_table(&subscriptions);

    Ok(())
}

/// Execute `azq subscription set`.
pub fn execute_set(cli: &Cli, term: Option<&str>) -> Result<()> {
    let settings = load_settings(cli)?;
    let azure = AzureClients::from_settings(&settings);
    let mut chooser = TerminalChooser::new(settings.page_size);

    output::info("Fetching subscriptions from Azure...");
    let subscriptions = azure.directory.list_subscriptions()?;
    if subscriptions.is_empty() {
        return Err(AzqError::NoSubscriptions);
    }

    let subscription = match choose_subscription(subscriptions, term, &mut chooser)? {
        Resolution::Selected(s) => s,
        Resolution::NotFound => {
            output::info("No matching subscriptions found");
            return Ok(());
        }
        Resolution::Declined => {
            output::info("No subscription selected");
            return Ok(());
        }
    };

    set_active_subscription(&settings.az_command, &subscription.id)?;
    output::success(&format!(
        "Current subscription set to {} ({})",
        subscription.display_name, subscription.id
    ));

    Ok(())
}

/// Narrow by `term` (fuzzy, best match first) and resolve to one subscription.
pub fn choose_subscription<C: Chooser + ?Sized>(
    subscriptions: Vec<Subscription>,
    term: Option<&str>,
    chooser: &mut C,
) -> Result<Resolution<Subscription>> {
    let candidates = match term.map(str::trim).filter(|t| !t.is_empty()) {
        Some(term) => RankedCandidates::rank(term, subscriptions, |s| s.display_name.as_str())
            .into_items(),
        None => subscriptions,
    };

    resolve(
        "Select a subscription",
        candidates,
        |s: &Subscription| s.display_name.clone(),
        chooser,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingChooser {
        answer: Option<usize>,
        labels: Vec<Vec<String>>,
    }

    impl Chooser for CountingChooser {
        fn choose(&mut self, _title: &str, labels: &[String]) -> Result<Option<usize>> {
            self.labels.push(labels.to_vec());
            Ok(self.answer)
        }
    }

    fn sub(id: &str, name: &str) -> Subscription {
        Subscription {
            id: id.into(),
            display_name: name.into(),
            tenant_id: "tenant".into(),
            state: "Enabled".into(),
        }
    }

    fn subs() -> Vec<Subscription> {
        vec![
            sub("1", "Contoso Production"),
            sub("2", "Contoso Staging"),
            sub("3", "Fabrikam Dev"),
        ]
    }

    #[test]
    fn term_matching_one_subscription_selects_it() {
        let mut chooser = CountingChooser {
            answer: None,
            labels: Vec::new(),
        };
        let out = choose_subscription(subs(), Some("fabrikam"), &mut chooser).unwrap();
        assert_eq!(out.selected().map(|s| s.id), Some("3".to_string()));
        assert!(chooser.labels.is_empty());
    }

    #[test]
    fn no_term_offers_every_subscription() {
        let mut chooser = CountingChooser {
            answer: Some(1),
            labels: Vec::new(),
        };
        let out = choose_subscription(subs(), None, &mut chooser).unwrap();
        assert_eq!(out.selected().map(|s| s.id), Some("2".to_string()));
        assert_eq!(chooser.labels[0].len(), 3);
    }

    #[test]
    fn unmatched_term_is_not_found() {
        let mut chooser = CountingChooser {
            answer: Some(0),
            labels: Vec::new(),
        };
        let out = choose_subscription(subs(), Some("zzz-nothing"), &mut chooser).unwrap();
        assert_eq!(out, Resolution::NotFound);
    }

    #[test]
    fn blank_term_is_ignored() {
        let mut chooser = CountingChooser {
            answer: None,
            labels: Vec::new(),
        };
        let out = choose_subscription(subs(), Some("   "), &mut chooser).unwrap();
        assert_eq!(out, Resolution::Declined);
        assert_eq!(chooser.labels[0].len(), 3);
    }
}
