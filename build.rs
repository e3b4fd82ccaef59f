use std::path::Path;

const KEY_GROUPS: [&str; 3] = ["retention_time", "retention_index", "comment"];

fn main() {
    let keys_path = Path::new("keys/default_keys.json");
    validate_keys_file(keys_path);
    set_build_dependencies();
}

fn validate_keys_file(keys_path: &Path) {
    // Ensure the default vocabulary exists at build time
    assert!(
        keys_path.exists(),
        "\n\nKEYS BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the default column key file before building.\n",
        keys_path.display()
    );

    let contents = std::fs::read_to_string(keys_path).unwrap_or_else(|e| {
        panic!(
            "\n\nKEYS BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            keys_path.display()
        );
    });

    let keys: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nKEYS BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            keys_path.display()
        );
    });

    assert!(
        keys.is_object(),
        "\n\nKEYS BUILD ERROR: Root must be a JSON object\n\
         Got: {keys}\n"
    );

    let total: usize = KEY_GROUPS
        .iter()
        .map(|group| validate_key_group(&keys, group))
        .sum();

    println!("cargo:warning=Validated default column keys: {total} keys");
}

fn validate_key_group(keys: &serde_json::Value, group: &str) -> usize {
    let values = keys.get(group).and_then(|v| v.as_array()).unwrap_or_else(|| {
        panic!(
            "\n\nKEYS BUILD ERROR: Missing or invalid '{group}' field\n\
             Each key group must be an array of strings.\n"
        );
    });

    assert!(
        !values.is_empty(),
        "\n\nKEYS BUILD ERROR: '{group}' must contain at least one key\n"
    );

    for (i, value) in values.iter().enumerate() {
        let key = value.as_str().unwrap_or_else(|| {
            panic!("\n\nKEYS BUILD ERROR: '{group}' entry {i} is not a string\n");
        });
        assert!(
            !key.trim().is_empty(),
            "\n\nKEYS BUILD ERROR: '{group}' entry {i} is empty\n"
        );
    }

    values.len()
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the vocabulary changes
    println!("cargo:rerun-if-changed=keys/default_keys.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
