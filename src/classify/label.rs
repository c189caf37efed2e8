use std::path::Path;

/// Extension every image file in a dataset carries.
pub const IMAGE_EXTENSION: &str = "ppm";

/// Extracts the category label from a `<label>_<digits>.ppm` file name.
///
/// Only the base name is inspected. The label must be non-empty and contain
/// no `_`; the number must be at least one ASCII digit. Anything else yields
/// an empty label, which callers treat as "unlabeled" rather than an error.
pub fn label_from_path(path: impl AsRef<Path>) -> String {
    let Some(name) = path.as_ref().file_name().and_then(|n| n.to_str()) else {
        return String::new();
    };
    let Some(stem) = name
        .strip_suffix(IMAGE_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
    else {
        return String::new();
    };
    let Some((label, number)) = stem.split_once('_') else {
        return String::new();
    };

    let number_ok = !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit());
    if label.is_empty() || !number_ok {
        return String::new();
    }
    label.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_label_from_full_paths() {
        assert_eq!(label_from_path("data/train/cherry_12.ppm"), "cherry");
        assert_eq!(label_from_path("lemon_0.ppm"), "lemon");
    }

    #[test]
    fn non_matching_names_give_empty_label() {
        for name in [
            "cherry.ppm",
            "cherry_.ppm",
            "_12.ppm",
            "cherry_12.png",
            "cherry_1a.ppm",
            "red_cherry_1.ppm",
            "cherry_12.ppm.bak",
            "dir/",
        ] {
            assert_eq!(label_from_path(name), "", "{name}");
        }
    }
}
