use crate::document::DocumentKind;

/// Which document panel is showing. Exactly one tab is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBar {
    active: DocumentKind,
}

impl Default for TabBar {
    fn default() -> Self {
        Self {
            active: DocumentKind::Aadhaar,
        }
    }
}

impl TabBar {
    pub fn active(&self) -> DocumentKind {
        self.active
    }

    pub fn is_active(&self, kind: DocumentKind) -> bool {
        self.active == kind
    }

    pub fn select(&mut self, kind: DocumentKind) {
        self.active = kind;
    }

    pub fn next(&mut self) {
        let all = DocumentKind::all();
        let idx = all.iter().position(|k| *k == self.active).unwrap_or(0);
        self.active = all[(idx + 1) % all.len()];
    }

    pub fn prev(&mut self) {
        let all = DocumentKind::all();
        let idx = all.iter().position(|k| *k == self.active).unwrap_or(0);
        self.active = all[(idx + all.len() - 1) % all.len()];
    }

    /// Position of the active tab in [`DocumentKind::all`].
    pub fn index(&self) -> usize {
        DocumentKind::all()
            .iter()
            .position(|k| *k == self.active)
            .unwrap_or(0)
    }
}
