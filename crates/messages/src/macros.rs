/// Version tag enum for one family: `Display` prints the full message name
/// (`camt.060.001.05`), `FromStr` also accepts the short forms `05` and `V05`.
macro_rules! version_tags {
    ($(#[$meta:meta])* $name:ident, $prefix:literal { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name { $($variant),+ }

        impl $name {
            /// Oldest first.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn tag(self) -> &'static str {
                match self { $($name::$variant => concat!($prefix, $tag)),+ }
            }

            pub fn namespace(self) -> &'static str {
                match self { $($name::$variant => concat!("urn:iso:std:iso:20022:tech:xsd:", $prefix, $tag)),+ }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result { f.write_str(self.tag()) }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::isomap_engine::EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let short = s.trim_start_matches(['V', 'v']);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.tag() == s || v.tag().rsplit('.').next() == Some(short))
                    .ok_or_else(|| ::isomap_engine::EngineError::UnknownVersion(s.to_string()))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.tag())
            }
        }
    };
}
