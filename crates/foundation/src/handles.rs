/// Feature handle: the index of a feature within its source collection.
///
/// Matches the ids a map library assigns with `generateId`, so the same
/// value addresses feature-state on the rendered source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub u32);

impl FeatureId {
    pub fn new(index: u32) -> Self {
        FeatureId(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}
