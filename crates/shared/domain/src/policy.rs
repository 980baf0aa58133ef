use bitflags::bitflags;

bitflags! {
    /// Boolean policy attributes of a flag.
    ///
    /// On disk each bit is a separate camelCase boolean (see [`crate::FlagRecord`]).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct PolicySet: u16 {
        const FRONTEND_ONLY = 1 << 0;
        const REQUIRES_LICENSE = 1 << 1;
        const REQUIRES_DEV_MODE = 1 << 2;
        const REQUIRES_RESTART = 1 << 3;
        const HIDE_FROM_DOCS = 1 << 4;
        const EXPOSE_TO_FRONTEND = 1 << 5;
        const RESTART_ACKNOWLEDGED = 1 << 6;
    }
}

const FIELD_NAMES: [(PolicySet, &str); 7] = [
    (PolicySet::FRONTEND_ONLY, "frontendOnly"),
    (PolicySet::REQUIRES_LICENSE, "requiresLicense"),
    (PolicySet::REQUIRES_DEV_MODE, "requiresDevMode"),
    (PolicySet::REQUIRES_RESTART, "requiresRestart"),
    (PolicySet::HIDE_FROM_DOCS, "hideFromDocs"),
    (PolicySet::EXPOSE_TO_FRONTEND, "exposeToFrontend"),
    (PolicySet::RESTART_ACKNOWLEDGED, "restartAcknowledged"),
];

impl PolicySet {
    /// Catalogue field names of the set bits, in declaration order.
    #[must_use]
    pub fn field_names(self) -> Vec<&'static str> {
        FIELD_NAMES.iter().filter(|(bit, _)| self.contains(*bit)).map(|(_, name)| *name).collect()
    }

    /// Listed in the frontend manifest.
    #[must_use]
    pub const fn is_frontend_visible(self) -> bool {
        self.intersects(Self::FRONTEND_ONLY.union(Self::EXPOSE_TO_FRONTEND))
    }
}
