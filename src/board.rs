/// Everything read off one retrospective page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub title: String,
    pub columns: Vec<Column>,
}

/// One lane of the board. Its index in `Board::columns` is its CSV column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub votes: u32,
}

impl Board {
    pub fn message_count(&self) -> usize {
        self.columns.iter().map(|c| c.messages.len()).sum()
    }
}

impl Message {
    pub fn new(text: impl Into<String>, votes: u32) -> Self {
        Self {
            text: text.into(),
            votes,
        }
    }
}
