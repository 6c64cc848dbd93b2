//! Fixed class table for the PlantVillage classifier.
//!
//! Ordering is load-bearing: index position maps directly to the model's
//! output index, exactly as the artifact was trained. Any edit here without a
//! matching retrain silently corrupts every diagnosis.

use shared::Verdict;

pub const NUM_CLASSES: usize = 39;

/// Sentinel class: the classifier found no plant-leaf content at all.
pub const NO_LEAF_LABEL: &str = "Background_without_leaves";

#[rustfmt::skip]
pub const CLASS_NAMES: [&str; NUM_CLASSES] = [
    "Apple___Apple_scab", "Apple___Black_rot", "Apple___Cedar_apple_rust", "Apple___healthy",
    "Background_without_leaves", "Blueberry___healthy", "Cherry___Powdery_mildew",
    "Cherry___healthy", "Corn___Cercospora_leaf_spot Gray_leaf_spot", "Corn___Common_rust",
    "Corn___Northern_Leaf_Blight", "Corn___healthy", "Grape___Black_rot",
    "Grape___Esca_(Black_Measles)", "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
    "Grape___healthy", "Orange___Haunglongbing_(Citrus_greening)", "Peach___Bacterial_spot",
    "Peach___healthy", "Pepper,_bell___Bacterial_spot", "Pepper,_bell___healthy",
    "Potato___Early_blight", "Potato___Late_blight", "Potato___healthy",
    "Raspberry___healthy", "Soybean___healthy", "Squash___Powdery_mildew",
    "Strawberry___Leaf_scorch", "Strawberry___healthy", "Tomato___Bacterial_spot",
    "Tomato___Early_blight", "Tomato___Late_blight", "Tomato___Leaf_Mold",
    "Tomato___Septoria_leaf_spot", "Tomato___Spider_mites Two-spotted_spider_mite",
    "Tomato___Target_Spot", "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
    "Tomato___Tomato_mosaic_virus", "Tomato___healthy",
];

pub fn class_name(index: usize) -> Option<&'static str> {
    CLASS_NAMES.get(index).copied()
}

/// Three-way verdict driving all user-facing messaging. The sentinel is
/// checked first so it can never read as a disease finding.
pub fn verdict_for(label: &str) -> Verdict {
    if label == NO_LEAF_LABEL {
        Verdict::NoLeaf
    } else if label.contains("healthy") {
        Verdict::Healthy
    } else {
        Verdict::Diseased
    }
}

/// Human-readable form of a class label: the `___` crop/condition separator
/// becomes `" - "`, remaining underscores become spaces, and the first
/// alphabetic character of each word is uppercased.
pub fn display_name(label: &str) -> String {
    label
        .split("___")
        .map(humanize_part)
        .collect::<Vec<_>>()
        .join(" - ")
}

fn humanize_part(part: &str) -> String {
    part.replace('_', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut done = false;
    for c in word.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete_and_ordered() {
        assert_eq!(CLASS_NAMES.len(), NUM_CLASSES);
        assert_eq!(class_name(0), Some("Apple___Apple_scab"));
        assert_eq!(class_name(4), Some(NO_LEAF_LABEL));
        assert_eq!(class_name(38), Some("Tomato___healthy"));
        assert_eq!(class_name(39), None);
    }

    #[test]
    fn verdicts() {
        assert_eq!(verdict_for("Tomato___healthy"), Verdict::Healthy);
        assert_eq!(verdict_for("Background_without_leaves"), Verdict::NoLeaf);
        assert_eq!(verdict_for("Potato___Late_blight"), Verdict::Diseased);
        assert_eq!(verdict_for("Pepper,_bell___healthy"), Verdict::Healthy);
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("Apple___Apple_scab"), "Apple - Apple Scab");
        assert_eq!(
            display_name("Pepper,_bell___Bacterial_spot"),
            "Pepper, Bell - Bacterial Spot"
        );
        assert_eq!(
            display_name("Grape___Esca_(Black_Measles)"),
            "Grape - Esca (Black Measles)"
        );
        assert_eq!(
            display_name("Background_without_leaves"),
            "Background Without Leaves"
        );
    }

    #[test]
    fn display_name_is_deterministic() {
        let a = display_name("Tomato___Tomato_Yellow_Leaf_Curl_Virus");
        let b = display_name("Tomato___Tomato_Yellow_Leaf_Curl_Virus");
        assert_eq!(a, b);
        assert_eq!(a, "Tomato - Tomato Yellow Leaf Curl Virus");
    }
}
