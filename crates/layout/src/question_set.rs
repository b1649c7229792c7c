//! The editable question list that precedes a layout run.

use crate::model::CapturedQuestion;
use quire_types::{DocumentRef, QuestionId};

/// An ordered list of captured questions whose `order` fields always read
/// `1..=len` in list order.
#[derive(Debug, Clone, Default)]
pub struct QuestionSet {
    questions: Vec<CapturedQuestion>,
}

impl QuestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn as_slice(&self) -> &[CapturedQuestion] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapturedQuestion> {
        self.questions.iter()
    }

    pub fn into_vec(self) -> Vec<CapturedQuestion> {
        self.questions
    }

    /// Appends a question at the end of the booklet.
    pub fn push(&mut self, question: CapturedQuestion) {
        let order = self.questions.len() as u32 + 1;
        self.questions.push(question.with_order(order));
    }

    /// Removes a question. Returns it if it was present.
    pub fn remove(&mut self, id: &QuestionId) -> Option<CapturedQuestion> {
        let index = self.position(id)?;
        let removed = self.questions.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Drops every question clipped from `document`. Returns how many were removed.
    pub fn remove_from_document(&mut self, document: &DocumentRef) -> usize {
        let before = self.questions.len();
        self.questions.retain(|q| &q.source_document != document);
        self.renumber();
        before - self.questions.len()
    }

    /// Moves a question one slot earlier. Returns `false` if it is already first or unknown.
    pub fn move_up(&mut self, id: &QuestionId) -> bool {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.questions.swap(index - 1, index);
                self.renumber();
                true
            }
            _ => false,
        }
    }

    /// Moves a question one slot later. Returns `false` if it is already last or unknown.
    pub fn move_down(&mut self, id: &QuestionId) -> bool {
        match self.position(id) {
            Some(index) if index + 1 < self.questions.len() => {
                self.questions.swap(index, index + 1);
                self.renumber();
                true
            }
            _ => false,
        }
    }

    fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| &q.id == id)
    }

    fn renumber(&mut self) {
        for (index, question) in self.questions.iter_mut().enumerate() {
            question.order = index as u32 + 1;
        }
    }
}

impl FromIterator<CapturedQuestion> for QuestionSet {
    fn from_iter<I: IntoIterator<Item = CapturedQuestion>>(iter: I) -> Self {
        let mut set = QuestionSet::new();
        for question in iter {
            set.push(question);
        }
        set
    }
}
