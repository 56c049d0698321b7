//! Fixed edge adjacency of the six cube faces

use crate::scene::{EdgeLinker, MapId};
use crate::{Edge, FaceOrientation};

use Edge::{Down as D, Left as L, Right as R, Up as U};
use FaceOrientation::{Back, Down, Front, Left, Right, Up};

/// A directed edge pairing between two surface faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSetting {
    pub source: FaceOrientation,
    pub source_edge: Edge,
    pub destination: FaceOrientation,
    pub destination_edge: Edge,
}

const fn setting(
    source: FaceOrientation,
    source_edge: Edge,
    destination: FaceOrientation,
    destination_edge: Edge,
) -> LinkSetting {
    LinkSetting {
        source,
        source_edge,
        destination,
        destination_edge,
    }
}

/// Every edge of every face, paired with the edge it touches in the
/// assembled cube. Each pairing appears once per direction.
pub const LINK_SETTINGS: [LinkSetting; 24] = [
    // Front side
    setting(Front, L, Left, R),
    setting(Front, U, Up, D),
    setting(Front, R, Right, L),
    setting(Front, D, Down, D),
    // Back side
    setting(Back, L, Right, R),
    setting(Back, U, Up, U),
    setting(Back, R, Left, L),
    setting(Back, D, Down, U),
    // Left side
    setting(Left, L, Back, R),
    setting(Left, U, Up, L),
    setting(Left, R, Front, L),
    setting(Left, D, Down, R),
    // Right side
    setting(Right, L, Front, R),
    setting(Right, U, Up, R),
    setting(Right, R, Back, L),
    setting(Right, D, Down, L),
    // Up side
    setting(Up, L, Left, U),
    setting(Up, U, Back, U),
    setting(Up, R, Right, U),
    setting(Up, D, Front, U),
    // Down side
    setting(Down, L, Right, D),
    setting(Down, U, Back, D),
    setting(Down, R, Left, D),
    setting(Down, D, Front, D),
];

/// Link the surface maps edge to edge.
///
/// Pairs with a missing face are skipped. Each link first clears whatever
/// was linked at the source edge, so joining again yields the same links.
/// Returns how many settings were applied.
pub fn join_surfaces<K: EdgeLinker + ?Sized>(
    surfaces: &[Option<MapId>; 6],
    linker: &mut K,
) -> usize {
    let mut applied = 0;
    for setting in &LINK_SETTINGS {
        let source = surfaces[setting.source.index()];
        let destination = surfaces[setting.destination.index()];
        if let (Some(source), Some(destination)) = (source, destination) {
            tracing::debug!(
                "linking {source}:{:?} -> {destination}:{:?}",
                setting.source_edge,
                setting.destination_edge
            );
            linker.unlink(source, setting.source_edge);
            linker.link(
                source,
                setting.source_edge,
                destination,
                setting.destination_edge,
            );
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_edge_linked_once() {
        let sources: HashSet<_> = LINK_SETTINGS
            .iter()
            .map(|s| (s.source, s.source_edge))
            .collect();
        let destinations: HashSet<_> = LINK_SETTINGS
            .iter()
            .map(|s| (s.destination, s.destination_edge))
            .collect();
        assert_eq!(sources.len(), 24);
        assert_eq!(destinations.len(), 24);
    }

    #[test]
    fn test_table_is_symmetric() {
        for s in &LINK_SETTINGS {
            let reverse = setting(s.destination, s.destination_edge, s.source, s.source_edge);
            assert!(
                LINK_SETTINGS.contains(&reverse),
                "missing reverse of {s:?}"
            );
            assert_ne!(s.source, s.destination);
        }
    }

    #[test]
    fn test_each_face_touches_four_others() {
        for face in FaceOrientation::ALL {
            let neighbours: HashSet<_> = LINK_SETTINGS
                .iter()
                .filter(|s| s.source == face)
                .map(|s| s.destination)
                .collect();
            assert_eq!(neighbours.len(), 4, "{face:?}");
        }
    }
}
