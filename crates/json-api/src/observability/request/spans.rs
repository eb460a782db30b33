//! HTTP span helpers.

use uuid::Uuid;

/// Low-cardinality route label for spans and metrics: UUID segments are
/// replaced with `{uuid}`.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_paths_are_kept() {
        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/discounts/apply"), "/discounts/apply");
    }

    #[test]
    fn uuid_segments_are_collapsed() {
        assert_eq!(
            route_label("/coupons/019c8e08-0000-7000-8000-000000000001/usage"),
            "/coupons/{uuid}/usage"
        );
    }
}
