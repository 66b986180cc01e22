// File: src/naming.rs
use crate::font::{NameKind, NameTable};
use log::{info, warn};

/// Style words kept at the end of a full name when a family is renamed.
const STYLE_WORDS: [&str; 6] = ["regular", "bold", "italic", "light", "medium", "heavy"];

/// Appends ` <suffix>` to the family and full names. Records that already
/// contain the suffix are left alone, so re-running is harmless.
/// Returns the number of records changed.
pub fn append_suffix(names: &mut NameTable, suffix: &str) -> usize {
    let mut updated = 0;
    for kind in [NameKind::Family, NameKind::FullName] {
        let Some(current) = names.get(kind) else {
            continue;
        };
        if current.contains(suffix) {
            continue;
        }
        let renamed = format!("{} {}", current, suffix);
        info!("{} name: '{}' -> '{}'", kind, current, renamed);
        names.set(kind, renamed);
        updated += 1;
    }
    updated
}

/// PostScript names allow no spaces; hyphens and underscores are dropped too.
pub fn postscript_name(name: &str) -> String {
    name.chars().filter(|c| !matches!(c, ' ' | '-' | '_')).collect()
}

fn full_name_for(new_family: &str, old_full: &str) -> String {
    let mut parts = old_full.split_whitespace();
    let style = match (parts.next(), parts.last()) {
        (Some(_), Some(last)) if STYLE_WORDS.contains(&last.to_lowercase().as_str()) => last,
        _ => "Regular",
    };
    format!("{} {}", new_family, style)
}

/// Renames the family. The full name keeps a recognised trailing style word
/// and falls back to `Regular`; the PostScript name is sanitised.
/// Returns the number of records changed.
pub fn rename_family(names: &mut NameTable, new_family: &str) -> usize {
    let mut updated = 0;

    if let Some(old) = names.get(NameKind::Family) {
        info!("Family name: '{}' -> '{}'", old, new_family);
        names.set(NameKind::Family, new_family);
        updated += 1;
    }
    if let Some(old) = names.get(NameKind::FullName) {
        let full = full_name_for(new_family, old);
        info!("Full name: '{}' -> '{}'", old, full);
        names.set(NameKind::FullName, full);
        updated += 1;
    }
    if let Some(old) = names.get(NameKind::PostScriptName) {
        let ps = postscript_name(new_family);
        info!("PostScript name: '{}' -> '{}'", old, ps);
        names.set(NameKind::PostScriptName, ps);
        updated += 1;
    }

    if updated == 0 {
        warn!("no name records were updated");
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> NameTable {
        let mut names = NameTable::new();
        names.set(NameKind::Family, "Inter");
        names.set(NameKind::Subfamily, "Regular");
        names.set(NameKind::FullName, "Inter Bold");
        names.set(NameKind::PostScriptName, "Inter-Bold");
        names
    }

    #[test]
    fn suffix_is_appended_once() {
        let mut names = names();
        assert_eq!(append_suffix(&mut names, "Fast"), 2);
        assert_eq!(names.get(NameKind::Family), Some("Inter Fast"));
        assert_eq!(names.get(NameKind::FullName), Some("Inter Bold Fast"));
        assert_eq!(names.get(NameKind::Subfamily), Some("Regular"));

        assert_eq!(append_suffix(&mut names, "Fast"), 0);
        assert_eq!(names.get(NameKind::Family), Some("Inter Fast"));
    }

    #[test]
    fn rename_keeps_style_and_sanitises_postscript() {
        let mut names = names();
        assert_eq!(rename_family(&mut names, "Quick Read-Sans"), 3);
        assert_eq!(names.get(NameKind::Family), Some("Quick Read-Sans"));
        assert_eq!(names.get(NameKind::FullName), Some("Quick Read-Sans Bold"));
        assert_eq!(names.get(NameKind::PostScriptName), Some("QuickReadSans"));
    }

    #[test]
    fn unknown_or_missing_style_falls_back_to_regular() {
        assert_eq!(full_name_for("New", "Inter Condensed"), "New Regular");
        assert_eq!(full_name_for("New", "Inter"), "New Regular");
        assert_eq!(full_name_for("New", "Inter italic"), "New italic");
    }

    #[test]
    fn empty_table_changes_nothing() {
        let mut names = NameTable::new();
        assert_eq!(rename_family(&mut names, "X"), 0);
        assert_eq!(append_suffix(&mut names, "Fast"), 0);
    }
}
