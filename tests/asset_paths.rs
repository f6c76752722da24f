//! Property tests for photo path resolution.

use proptest::prelude::*;

use therapair::domain::assets::{AssetPathResolver, RuntimeEnvironment};

fn resolver() -> AssetPathResolver {
    AssetPathResolver::default()
}

#[test]
fn production_adam_resolves_to_absolute_jpeg() {
    assert_eq!(
        resolver().resolve("adam.jpg", &RuntimeEnvironment::hosted("unisonmentalhealth.com")),
        "https://unisonmentalhealth.com/therapair-widget/images/adam.jpeg"
    );
}

#[test]
fn unknown_host_falls_back_to_relative_jpeg() {
    assert_eq!(
        resolver().resolve("adam.jpg", &RuntimeEnvironment::hosted("")),
        "images/adam.jpeg"
    );
}

#[test]
fn local_file_keeps_resized_original() {
    assert_eq!(
        resolver().resolve("adam.jpg", &RuntimeEnvironment::local_file()),
        "images/resized/adam.jpg"
    );
}

proptest! {
    #[test]
    fn proptest_local_file_preserves_extension(
        name in "[a-z][a-z0-9_-]{0,15}",
        ext in prop::sample::select(vec!["jpg", "jpeg", "png", "webp"]),
        hostname in "[a-z.]{0,20}",
    ) {
        let filename = format!("{}.{}", name, ext);
        let env = RuntimeEnvironment { is_local_file: true, hostname };
        let resolved = resolver().resolve(&filename, &env);
        prop_assert_eq!(resolved, format!("images/resized/{}", filename));
    }

    #[test]
    fn proptest_production_jpg_becomes_absolute_jpeg(name in "[a-z][a-z0-9_-]{0,15}") {
        let resolved = resolver().resolve(
            &format!("{}.jpg", name),
            &RuntimeEnvironment::hosted("unisonmentalhealth.com"),
        );
        prop_assert_eq!(
            resolved,
            format!("https://unisonmentalhealth.com/therapair-widget/images/{}.jpeg", name)
        );
    }

    #[test]
    fn proptest_other_hosts_stay_relative(
        name in "[a-z][a-z0-9_-]{0,15}",
        host in "[a-z]{1,10}\\.(test|local|dev)",
    ) {
        let resolved = resolver().resolve(&format!("{}.jpg", name), &RuntimeEnvironment::hosted(host));
        prop_assert_eq!(resolved, format!("images/{}.jpeg", name));
    }
}
