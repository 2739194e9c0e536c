use std::collections::HashSet;

use tracing::debug;

use crate::model::Replay;

/// Collapse duplicate uploads of the same match, keeping the first copy.
///
/// Duplicates share a `match_guid`; `replay_id` differs between uploads and
/// is not used. Replays without a guid are always kept.
pub fn dedup_by_match_guid(replays: Vec<Replay>) -> Vec<Replay> {
    let total = replays.len();
    let mut seen = HashSet::new();
    let unique: Vec<Replay> = replays
        .into_iter()
        .filter(|replay| match &replay.match_guid {
            Some(guid) => seen.insert(guid.clone()),
            None => true,
        })
        .collect();

    debug!(
        total,
        kept = unique.len(),
        dropped = total - unique.len(),
        "deduplicated replay batch"
    );
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::game;

    #[test]
    fn test_dedup_keeps_first_upload() {
        let replays = vec![
            game("upload-a").guid("M1").map("First").build(),
            game("upload-b").guid("M2").build(),
            game("upload-c").guid("M1").map("Second").build(),
        ];

        let unique = dedup_by_match_guid(replays);
        let ids: Vec<_> = unique.iter().map(|r| r.replay_id.as_str()).collect();
        assert_eq!(ids, ["upload-a", "upload-b"]);
        assert_eq!(unique[0].map_name, "First");
    }

    #[test]
    fn test_dedup_ignores_replay_id() {
        // same replay id, different matches
        let replays = vec![
            game("same").guid("M1").build(),
            game("same").guid("M2").build(),
            game("no-guid").build(),
            game("no-guid").build(),
        ];

        assert_eq!(dedup_by_match_guid(replays).len(), 4);
    }
}
