use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Destructive,
}

/// A transient, dismissable notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Notices recorded by a view, oldest first, until the front end drains them.
#[derive(Debug, Default)]
pub struct Notices(Vec<Notice>);

impl Notices {
    pub fn info(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(title.into(), description.into(), Severity::Info);
    }

    pub fn error(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(title.into(), description.into(), Severity::Destructive);
    }

    fn push(&mut self, title: String, description: String, severity: Severity) {
        self.0.push(Notice {
            title,
            description,
            severity,
        });
    }

    pub fn last(&self) -> Option<&Notice> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notice> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.0)
    }

    /// Dismisses the notice at `index`, if it exists.
    pub fn dismiss(&mut self, index: usize) -> Option<Notice> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }
}
