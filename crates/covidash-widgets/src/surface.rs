/// The place a chart or map library draws into, identified by name.
///
/// Plays the role of a canvas element or map container: the library learns
/// which surface it was attached to, and the widget renders it with that
/// name as its accessible label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Surface {
    name: String,
}

impl Surface {
    /// Name a surface.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The surface's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
