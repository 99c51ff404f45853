/// Asks the player for a name to put on a new record.
pub trait NamePrompt {
    /// `None` when the player cancels, the record is then dropped.
    fn ask_name(&mut self, title: &str) -> Option<String>;
}

impl<F> NamePrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn ask_name(&mut self, title: &str) -> Option<String> {
        self(title)
    }
}

pub const DEFAULT_PLAYER_NAME: &str = "Player";

pub(crate) fn normalize_name(raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_owned()
    } else {
        name.to_owned()
    }
}
