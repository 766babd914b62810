use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    pub fn from_keyword(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "common" | "c" => Some(Rarity::Common),
            "rare" | "r" => Some(Rarity::Rare),
            "epic" | "e" => Some(Rarity::Epic),
            "legendary" | "legend" | "l" => Some(Rarity::Legendary),
            _ => None,
        }
    }

    pub fn is_common(self) -> bool {
        self == Rarity::Common
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "BAT")]
    Batter,
    #[serde(rename = "BOWL")]
    Bowler,
    #[serde(rename = "AR")]
    AllRounder,
    #[serde(rename = "WK")]
    WicketKeeper,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Batter,
        Role::Bowler,
        Role::AllRounder,
        Role::WicketKeeper,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Role::Batter => "BAT",
            Role::Bowler => "BOWL",
            Role::AllRounder => "AR",
            Role::WicketKeeper => "WK",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::Batter => "Batsman",
            Role::Bowler => "Bowler",
            Role::AllRounder => "All-Rounder",
            Role::WicketKeeper => "Wicket Keeper",
        }
    }

    pub fn from_keyword(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BAT" | "BATTER" | "BATSMAN" => Some(Role::Batter),
            "BOWL" | "BOWLER" => Some(Role::Bowler),
            "AR" | "ALLROUNDER" | "ALL-ROUNDER" => Some(Role::AllRounder),
            "WK" | "KEEPER" | "WICKETKEEPER" => Some(Role::WicketKeeper),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PlayerStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batting: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowling: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielding: Option<u32>,
}

impl PlayerStats {
    pub fn is_empty(&self) -> bool {
        self.batting.is_none() && self.bowling.is_none() && self.fielding.is_none()
    }

    /// Present stats as `(label, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, u32)> {
        [
            ("BAT", self.batting),
            ("BOWL", self.bowling),
            ("FIELD", self.fielding),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| (label, value)))
        .collect()
    }
}

/// A catalog player. Drawn cards are clones of these, so the same identity
/// can appear many times in a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub team: String,
    pub rating: u32,
    pub rarity: Rarity,
    #[serde(default)]
    pub stats: PlayerStats,
    #[serde(default)]
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_orders_by_tier() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn keywords_parse_case_insensitively() {
        assert_eq!(Rarity::from_keyword("LEGENDARY"), Some(Rarity::Legendary));
        assert_eq!(Rarity::from_keyword(" epic "), Some(Rarity::Epic));
        assert_eq!(Rarity::from_keyword("mythic"), None);
        assert_eq!(Role::from_keyword("wk"), Some(Role::WicketKeeper));
        assert_eq!(Role::from_keyword("all-rounder"), Some(Role::AllRounder));
    }

    #[test]
    fn player_json_uses_short_role_codes_and_skips_missing_stats() {
        let player = Player {
            id: "6".to_string(),
            name: "Jasprit Bumrah".to_string(),
            role: Role::Bowler,
            team: "India".to_string(),
            rating: 94,
            rarity: Rarity::Epic,
            stats: PlayerStats {
                batting: None,
                bowling: Some(96),
                fielding: Some(75),
            },
            image: "jasprit-bumrah.jpg".to_string(),
        };
        let body = serde_json::to_string(&player).expect("serialize");
        assert!(body.contains(r#""role":"BOWL""#));
        assert!(body.contains(r#""rarity":"epic""#));
        assert!(!body.contains("batting"));
        assert_eq!(player.stats.entries(), vec![("BOWL", 96), ("FIELD", 75)]);
    }
}
