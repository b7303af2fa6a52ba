//! Canned documents for common test scenarios.

/// Metadata declaring `zlib` 1.2 with `ZLIB_STATIC`.
pub const ZLIB_METADATA: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<BuildMetadata>
  <Library name="zlib">
    <Version number="1.2">
      <PublicDefinitions>
        <Definition>ZLIB_STATIC</Definition>
      </PublicDefinitions>
    </Version>
  </Library>
</BuildMetadata>
"#;

/// Build configuration covering every entry kind the generator handles.
pub const SAMPLE_BUILD_CONFIG: &str = r#"
[general]
cmake_version = "3.21"

[zlib."1.2"]
type = "static"
public_definitions = ["ZLIB_STATIC"]

[fmt."10.1"]
public_definitions = ["FMT_HEADER_ONLY", "FMT_USE_NONTYPE_TEMPLATE_ARGS=0"]

[fmt."9.0"]
type = "shared"

[sdl."2.28"]
type = "dynamic"
"#;
