use rstest::rstest;
use std::path::PathBuf;
use syncroot_fs::NormalizedPath;

#[rstest]
#[case("/srv/env//", "/srv/env")]
#[case("/srv/env", "/srv/env")]
#[case("/srv//env///modules", "/srv/env/modules")]
#[case("cache//dir/", "cache/dir")]
#[case("/", "/")]
#[case("", "")]
fn normalizes(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[test]
fn equal_after_normalization() {
    assert_eq!(NormalizedPath::new("/srv//env/"), NormalizedPath::new("/srv/env"));
}

#[test]
fn join_normalizes() {
    let base = NormalizedPath::new("/srv/envs/");
    assert_eq!(base.join("/production//").as_str(), "/srv/envs/production");
}

#[test]
fn file_name_and_extension() {
    let path = NormalizedPath::new("/var/cache/syncroot/settings.yaml");
    assert_eq!(path.file_name(), Some("settings.yaml"));
    assert_eq!(path.extension(), Some("yaml"));
    assert_eq!(NormalizedPath::new("/srv/.hidden").extension(), None);
}

#[test]
fn to_native_roundtrip() {
    let path = NormalizedPath::new("/srv/env");
    assert_eq!(path.to_native(), PathBuf::from("/srv/env"));
    assert_eq!(NormalizedPath::from(path.to_native()), path);
}

#[test]
fn display_matches_as_str() {
    let path = NormalizedPath::new("/a//b/");
    assert_eq!(path.to_string(), "/a/b");
}
