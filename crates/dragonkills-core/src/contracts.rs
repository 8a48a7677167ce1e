//! Wire identifiers shared between the engine and its modules.
//!
//! Event names, template classes, action group ids and property keys are
//! the contract between independently developed modules and must not
//! change.

/// Identifiers owned by the engine itself.
pub mod core {
    /// Id of the action group every viewpoint may carry without a title.
    pub const DEFAULT_ACTION_GROUP: &str = "lotgd/core/default";

    /// Prefix of the hook published when a character navigates to a scene.
    /// The scene's template class is appended.
    pub const NAVIGATE_TO_PREFIX: &str = "h/lotgd/core/navigate-to/";

    /// Character property holding the viewpoint last shown to the character.
    pub const PROPERTY_VIEWPOINT: &str = "lotgd/core/viewpoint";

    /// Returns the navigation hook name for scenes built from `template`.
    #[must_use]
    pub fn navigate_to_event(template: &str) -> String {
        format!("{NAVIGATE_TO_PREFIX}{template}")
    }
}

/// Identifiers owned by the Forest module.
pub mod forest {
    /// Template class of forest scenes.
    pub const TEMPLATE: &str = "lotgd/module-forest/forest";
    /// Hook published after a forest scene has been rendered.
    pub const HOOK_FOREST_NAVIGATION: &str = "h/lotgd/module-forest/forest-navigation";
    /// Action group holding the forest's fight actions.
    pub const FIGHT_GROUP: &str = "lotgd/module-forest/forest/fight";
    /// Title of the fight action group.
    pub const FIGHT_GROUP_TITLE: &str = "Fight";
}

/// Identifiers owned by the Village module.
pub mod village {
    /// Template class of village scenes.
    pub const TEMPLATE: &str = "lotgd/module-village/village";
}

/// Identifiers owned by the NewDay module.
pub mod new_day {
    /// Hook published after a character's new day has been applied.
    pub const HOOK_AFTER_NEW_DAY: &str = "h/lotgd/module-new-day/after";
    /// Character property holding the game time of the last new day.
    pub const PROPERTY_LAST_NEW_DAY: &str = "lotgd/module-new-day/lastNewDay";
}

/// Identifiers owned by the ResFight module.
pub mod res_fight {
    /// Hook published when a battle has ended.
    pub const HOOK_BATTLE_OVER: &str = "h/lotgd/module-res-fight/battleOver";
    /// Character property holding the state of a suspended battle.
    pub const PROPERTY_BATTLE_STATE: &str = "lotgd/module-res-fight/battleState";
    /// Action group holding the fight actions of a running battle.
    pub const FIGHT_GROUP: &str = "lotgd/module-res-fight/fight";
}
