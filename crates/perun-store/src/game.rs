//! Conventional per-category stores beneath a game install root.

use std::path::Path;
use std::sync::Arc;

use crate::convert::{Convert, ExternalConverter};
use crate::store::{RawStore, TreeStore};
use crate::Result;

/// The standard data directories of a Rebellion install, each a tree store
/// over one extension, all sharing one converter for binary-form files.
pub struct GameData {
    /// `GameInfo/*.entity` — ships, modules, players.
    pub entities: TreeStore,
    /// `GameInfo/*.galaxyScenarioDef` — scenario definitions, including
    /// the player roster.
    pub scenarios: TreeStore,
    /// `GameInfo/*.constants` — gameplay constants, including capital-ship
    /// experience tables.
    pub constants: TreeStore,
    /// `Mesh/*.mesh`.
    pub meshes: TreeStore,
    /// `Particle/*.particle`.
    pub particles: TreeStore,
    /// `Window/*.brushes` — UI brush definitions.
    pub brushes: TreeStore,
    /// `String/*.str` — localized string tables.
    pub strings: TreeStore,
}

impl GameData {
    /// Open the conventional stores under `game_root`, locating the
    /// converter executable there.
    pub fn open(game_root: impl AsRef<Path>) -> Result<Self> {
        let root = game_root.as_ref();
        let converter: Arc<dyn Convert + Send + Sync> =
            Arc::new(ExternalConverter::locate(root)?);
        Self::with_converter(root, converter)
    }

    /// Open the conventional stores with an explicit converter.
    pub fn with_converter(
        game_root: impl AsRef<Path>,
        converter: Arc<dyn Convert + Send + Sync>,
    ) -> Result<Self> {
        let root = game_root.as_ref();
        let open = |dir: &str, ext: &str| -> Result<TreeStore> {
            Ok(TreeStore::new(RawStore::with_converter(
                root.join(dir),
                ext,
                Arc::clone(&converter),
            )?))
        };

        Ok(Self {
            entities: open("GameInfo", "entity")?,
            scenarios: open("GameInfo", "galaxyScenarioDef")?,
            constants: open("GameInfo", "constants")?,
            meshes: open("Mesh", "mesh")?,
            particles: open("Particle", "particle")?,
            brushes: open("Window", "brushes")?,
            strings: open("String", "str")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_open_conventional_layout() {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["GameInfo", "Mesh", "Particle", "Window", "String"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
        }
        fs::write(dir.path().join("ConvertData1.exe"), b"").unwrap();
        fs::write(
            dir.path().join("GameInfo/PlayerPsiLoyalist.entity"),
            "TXT\nraceNameParsePrefix PSI\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("GameInfo/GalaxyScenarioDef.galaxyScenarioDef"),
            "TXT\nplayerType\n\tentityDefName PlayerPsiLoyalist\nplayerType\n\tentityDefName PlayerPsiRebel\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("GameInfo/Gameplay.constants"),
            "TXT\nGameplayConstants\n\tCapitalShipData\n\t\tExperienceLevelData\n\t\t\tLevel:0 100.0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("String/English.str"),
            "TXT\nStringInfo\n\tID IDS_KOL\n\tValue \"Kol Battleship\"\n",
        )
        .unwrap();

        let game = GameData::open(dir.path()).unwrap();

        let player = game.entities.get("playerpsiloyalist").unwrap();
        assert_eq!(player.root().single_text("raceNameParsePrefix").unwrap(), "PSI");

        let scenario = game.scenarios.get("GalaxyScenarioDef").unwrap();
        let players = scenario
            .root()
            .select_text("playerType/entityDefName")
            .unwrap();
        assert_eq!(players, ["PlayerPsiLoyalist", "PlayerPsiRebel"]);

        let constants = game.constants.get("Gameplay").unwrap();
        let experience = constants
            .root()
            .single("GameplayConstants/CapitalShipData/ExperienceLevelData")
            .unwrap();
        assert_eq!(experience.sorted_levels().unwrap().len(), 1);

        let strings = game.strings.get("English").unwrap();
        let name = strings
            .root()
            .single_text("StringInfo[ID=\"IDS_KOL\"]/Value")
            .unwrap();
        assert_eq!(name, "Kol Battleship");

        assert!(game.meshes.keys().is_empty());
    }
}
