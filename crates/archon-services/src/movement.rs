//! Movement (map) service client.

use archon_protocol::{
    Coords, MoveReply, MoveRequest, MoveStatus, ServiceKind, ServiceRequest,
    TileInfo,
};
use archon_transport::Channel;

use crate::{Endpoint, ServiceError};

/// Narration shown when the map service cannot be reached.
pub const UNREACHABLE_NARRATION: &str =
    "The way ahead is lost in haze. The map service cannot be reached.";

/// Inspection text shown when the map service cannot be reached.
pub const UNREACHABLE_INSPECTION: &str =
    "Nothing here can be made out until the map service answers again.";

/// Why the map service refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The requested map is not the one the service holds.
    MapMismatch,
    /// The destination is off the edge of the map.
    OutOfBounds,
}

/// Result of asking to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move is legal; this is the destination tile.
    Moved(TileInfo),

    /// The service answered but refused the move. The tile carries the
    /// service's explanation and never starts a fight.
    Rejected { reason: Rejection, tile: TileInfo },

    /// No usable reply. The tile is the fixed "unreachable" description.
    Unreachable(TileInfo),
}

impl MoveOutcome {
    /// The tile the player should now see, whatever happened.
    pub fn tile(&self) -> &TileInfo {
        match self {
            Self::Moved(tile) | Self::Unreachable(tile) => tile,
            Self::Rejected { tile, .. } => tile,
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// The fixed tile used when the map service is unreachable.
pub fn unreachable_tile() -> TileInfo {
    TileInfo::inert(UNREACHABLE_NARRATION, UNREACHABLE_INSPECTION)
}

/// Client for the movement service.
pub struct MovementClient<C: Channel> {
    endpoint: Endpoint<C>,
    service_key: String,
}

impl<C: Channel> MovementClient<C> {
    pub fn new(channel: C, service_key: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new(ServiceKind::Movement, channel),
            service_key: service_key.into(),
        }
    }

    /// Asks whether the player on `map` may stand at `destination`.
    ///
    /// Never fails: transport faults and malformed replies become
    /// [`MoveOutcome::Unreachable`].
    pub async fn request_move(&mut self, map: &str, destination: Coords) -> MoveOutcome {
        match self.try_move(map, destination).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    service = %self.endpoint.kind(),
                    endpoint = self.endpoint.address(),
                    error = %e,
                    "movement unavailable, using unreachable tile"
                );
                MoveOutcome::Unreachable(unreachable_tile())
            }
        }
    }

    async fn try_move(
        &mut self,
        map: &str,
        destination: Coords,
    ) -> Result<MoveOutcome, ServiceError> {
        let request = ServiceRequest::new(
            self.service_key.as_str(),
            MoveRequest {
                map: map.to_string(),
                coords: destination,
            },
        );
        let reply: MoveReply = self.endpoint.call(&request).await?;

        let reason = match reply.status {
            MoveStatus::Success => {
                let tile = reply.into_tile()?;
                tracing::debug!(%destination, biome = %tile.biome, "move accepted");
                return Ok(MoveOutcome::Moved(tile));
            }
            MoveStatus::Error => Rejection::MapMismatch,
            MoveStatus::OutOfBounds => Rejection::OutOfBounds,
        };

        tracing::debug!(%destination, ?reason, "move rejected");
        let tile = TileInfo::inert(reply.data.narration, reply.data.inspection);
        Ok(MoveOutcome::Rejected { reason, tile })
    }
}
