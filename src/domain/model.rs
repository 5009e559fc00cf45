/// Visual treatment of the status message area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageTone {
    #[default]
    Neutral,
    Success,
    Error,
}
