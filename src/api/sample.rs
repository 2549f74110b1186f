//! Bundled sample quests served when the backend is unreachable and
//! `fallback.use_sample_data` is on.

use crate::model::{Coordinates, Point, Quest, RoutePoint};

fn point(id: u64, name: &str, description: &str, lat: f64, lng: f64) -> Point {
    let mut p = Point::new(id, name, Coordinates::new(lat, lng));
    p.description = description.to_string();
    p
}

fn quest(id: u64, name: &str, description: &str, points: Vec<Point>) -> Quest {
    let mut q = Quest::new(id, name);
    q.description = description.to_string();
    q.points = points
        .into_iter()
        .enumerate()
        .map(|(i, p)| RoutePoint::new(i as u32 + 1, p))
        .collect();
    q
}

/// Two short walking tours.
pub fn sample_quests() -> Vec<Quest> {
    let mut bridge_bend = point(1004, "River bend", "", 56.1447, 47.2521);
    bridge_bend.is_intermediate = true;

    vec![
        quest(
            901,
            "Embankment walk",
            "A short loop along the bay embankment.",
            vec![
                point(1001, "Mother monument", "Start at the monument above the bay.", 56.1446, 47.2567),
                point(1002, "Bay steps", "Walk down to the water.", 56.1439, 47.2489),
                point(1003, "Old pier", "End at the old pier.", 56.1421, 47.2446),
            ],
        ),
        quest(
            902,
            "Old town",
            "Churches and merchant houses of the old quarter.",
            vec![
                point(2001, "Cathedral", "Start at the cathedral square.", 56.1471, 47.2490),
                bridge_bend,
                point(2002, "Merchant house", "A restored merchant house.", 56.1460, 47.2540),
                point(2003, "Drama theatre", "Finish at the theatre.", 56.1418, 47.2590),
            ],
        ),
    ]
}
