//! Fuzzy challenge picker using skim.
//!
//! Backs `plankr challenge join` when no ID is given.

use std::sync::Arc;

use skim::prelude::*;

use super::ChallengeView;

/// A wrapper around a challenge that implements `SkimItem`.
struct ChallengeItem {
    view: ChallengeView,
    display: String,
    id_str: String,
}

impl ChallengeItem {
    fn new(view: ChallengeView) -> Self {
        let display = format!(
            "{} ({}, {} participants, {})",
            view.title,
            view.kind,
            view.participants,
            view.date_range()
        );
        let id_str = view.id.to_string();
        Self {
            view,
            display,
            id_str,
        }
    }
}

impl SkimItem for ChallengeItem {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.display)
    }

    fn preview(&self, _context: PreviewContext<'_>) -> ItemPreview {
        let mut preview = String::new();

        preview.push_str(&format!("Title: {}\n", self.view.title));
        preview.push_str(&format!("Type: {}\n", self.view.kind));
        preview.push_str(&format!("Runs: {}\n", self.view.date_range()));
        preview.push_str(&format!("Participants: {}\n", self.view.participants));

        if let Some(ref url) = self.view.meeting_url {
            preview.push_str(&format!("Meeting: {url}\n"));
        }

        if !self.view.description.is_empty() {
            preview.push_str(&format!("\n{}\n", self.view.description));
        }

        ItemPreview::Text(preview)
    }

    fn output(&self) -> Cow<'_, str> {
        // Return the ID for easy processing
        Cow::Borrowed(&self.id_str)
    }
}

/// Run the interactive picker over joinable challenges.
///
/// Returns the chosen challenge ID, or `None` when the list is empty or
/// the user aborts.
pub fn pick_challenge(views: Vec<ChallengeView>) -> Option<i64> {
    if views.is_empty() {
        return None;
    }

    let header = "Enter: join | Ctrl-C: cancel".to_string();

    let skim_options = SkimOptionsBuilder::default()
        .height(Some("50%"))
        .multi(false)
        .prompt(Some("Join challenge > "))
        .preview(Some(""))
        .preview_window(Some("right:50%:wrap"))
        .bind(vec!["ctrl-c:abort", "enter:accept"])
        .header(Some(&header))
        .build()
        .ok()?;

    let items: Vec<Arc<dyn SkimItem>> = views
        .into_iter()
        .map(|v| {
            let item: Arc<dyn SkimItem> = Arc::new(ChallengeItem::new(v));
            item
        })
        .collect();

    let (tx, rx): (SkimItemSender, SkimItemReceiver) = unbounded();
    for item in items {
        let _ = tx.send(item);
    }
    drop(tx);

    let output = Skim::run_with(&skim_options, Some(rx))?;
    if output.is_abort {
        return None;
    }

    output
        .selected_items
        .first()
        .and_then(|item| item.output().parse().ok())
}
