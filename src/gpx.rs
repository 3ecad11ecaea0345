use crate::models::RoutePoint;

/// Best-effort extraction of track points from an uploaded GPX document.
///
/// The editor only needs the coordinate list to seed the route map, so this
/// scans for `<trkpt lat=".." lon="..">` elements (plus an optional `<ele>`
/// child) instead of pulling in a full XML parser. Anything malformed is
/// skipped; an unreadable file simply yields an empty list.
pub fn scan_track_points(gpx: &str) -> Vec<RoutePoint> {
    let mut points = Vec::new();
    let mut rest = gpx;

    while let Some(start) = rest.find("<trkpt") {
        rest = &rest[start..];
        let Some(tag_end) = rest.find('>') else { break };
        let tag = &rest[..tag_end];

        let lat = attr_value(tag, "lat").and_then(|v| v.parse::<f64>().ok());
        let lng = attr_value(tag, "lon").and_then(|v| v.parse::<f64>().ok());

        // The elevation child, when present, sits before the closing </trkpt>.
        let body_end = rest.find("</trkpt>").unwrap_or(rest.len());
        let elevation = rest[..body_end]
            .find("<ele>")
            .and_then(|s| {
                let after = &rest[s + 5..body_end.max(s + 5)];
                after.find("</ele>").map(|e| after[..e].trim().to_string())
            })
            .and_then(|v| v.parse::<f64>().ok());

        if let (Some(lat), Some(lng)) = (lat, lng) {
            points.push(RoutePoint {
                lat,
                lng,
                elevation,
            });
        }

        rest = &rest[tag_end + 1..];
    }

    points
}

fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let marker = format!("{}=\"", name);
    let start = tag.find(&marker)? + marker.len();
    let end = tag[start..].find('"')? + start;
    Some(&tag[start..end])
}
