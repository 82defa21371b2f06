//! The movement service: one fixed map, answered tile by tile.

use archon_protocol::{
    Coords, EncounterChance, MoveReply, MoveRequest, MoveStatus, ServiceKind,
    ServiceRequest, TileData,
};

use crate::ServiceHandler;

/// One kind of terrain as the map service describes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terrain {
    pub narration: &'static str,
    pub inspection: &'static str,
    pub biome: &'static str,
    pub encounter: u8,
}

pub const SCORCHED: Terrain = Terrain {
    narration: "The land that surrounds you is scorched. No life could ever live here.",
    inspection: "you feel as though you are being watched.",
    biome: "scorched",
    encounter: 5,
};

pub const FIELDS: Terrain = Terrain {
    narration: "You stand in a vast field. The ground beneath you is as green as emerald.",
    inspection: "You only notice the warmth of the sun on your face.",
    biome: "fields",
    encounter: 15,
};

pub const DESERT: Terrain = Terrain {
    narration: "You find yourself in a dry desert. It would take a hearty person to survive these lands.",
    inspection: "You kick the sand around to find only more sand.",
    biome: "desert",
    encounter: 10,
};

const MISMATCH_TEXT: &str = "Map name does not match save file";
const SEA_NARRATION: &str = "You only see vast sea where you are trying to go.";
const SEA_INSPECTION: &str = "You smell salt.";

impl Terrain {
    fn to_data(self) -> TileData {
        TileData {
            narration: self.narration.to_string(),
            inspection: self.inspection.to_string(),
            biome: Some(self.biome.to_string()),
            encounter: EncounterChance::new(u32::from(self.encounter)),
        }
    }
}

/// Answers movement requests for a single named map.
///
/// The grid is indexed `grid[x][y]`.
#[derive(Debug, Clone)]
pub struct MapService {
    name: String,
    grid: Vec<Vec<Terrain>>,
}

impl MapService {
    /// A map named `name` over `grid`.
    pub fn new(name: impl Into<String>, grid: Vec<Vec<Terrain>>) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }

    /// The 10x8 `test_map`: scorched on the outer edge, desert just
    /// inside the short sides, fields in the middle.
    pub fn test_map() -> Self {
        const INNER: [Terrain; 8] = [
            SCORCHED, DESERT, FIELDS, FIELDS, FIELDS, FIELDS, DESERT, SCORCHED,
        ];
        let mut grid = vec![INNER.to_vec(); 10];
        grid[0] = vec![SCORCHED; 8];
        grid[9] = vec![SCORCHED; 8];
        Self::new("test_map", grid)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The terrain at `coords`, or `None` off the map.
    pub fn terrain(&self, coords: Coords) -> Option<Terrain> {
        let x = usize::try_from(coords.x).ok()?;
        let y = usize::try_from(coords.y).ok()?;
        self.grid.get(x)?.get(y).copied()
    }

    /// Resolves one move. A wrong map name wins over bounds.
    pub fn resolve(&self, request: &MoveRequest) -> MoveReply {
        if request.map != self.name {
            tracing::debug!(requested = %request.map, held = %self.name, "map mismatch");
            return MoveReply {
                status: MoveStatus::Error,
                data: TileData {
                    narration: MISMATCH_TEXT.to_string(),
                    inspection: MISMATCH_TEXT.to_string(),
                    biome: Some(String::new()),
                    encounter: Some(EncounterChance::NONE),
                },
            };
        }

        match self.terrain(request.coords) {
            Some(terrain) => MoveReply {
                status: MoveStatus::Success,
                data: terrain.to_data(),
            },
            None => MoveReply {
                status: MoveStatus::OutOfBounds,
                data: TileData {
                    narration: SEA_NARRATION.to_string(),
                    inspection: SEA_INSPECTION.to_string(),
                    biome: None,
                    encounter: None,
                },
            },
        }
    }
}

impl ServiceHandler for MapService {
    type Request = ServiceRequest<MoveRequest>;
    type Reply = MoveReply;
    const KIND: ServiceKind = ServiceKind::Movement;

    fn handle(&mut self, request: Self::Request) -> MoveReply {
        self.resolve(&request.data)
    }
}
