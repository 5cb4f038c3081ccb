use std::collections::HashMap;

pub fn builtin_languages() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("en", include_str!("../lang/en.json")),
        ("es", include_str!("../lang/es.json")),
    ])
}

pub fn builtin_characters() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("hana", include_str!("../content/characters/hana.json")),
        ("kappa", include_str!("../content/characters/kappa.yaml")),
    ])
}
