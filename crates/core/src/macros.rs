/// Implement [`Record`](crate::Record) and [`Field`](crate::Field) for a struct by
/// listing its addressable names and the Rust fields behind them.
///
/// ```ignore
/// impl_record!(GroupHeader { "MsgId" => msg_id, "CreDtTm" => cre_dt_tm });
/// impl_record!(Party<F> { "Agt" => agt });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn shape(&self) -> &'static str { stringify!($ty) }
            fn field_names(&self) -> &'static [&'static str] { &[$($name),*] }
            fn field(&self, name: &str) -> Option<&dyn $crate::Field> {
                match name {
                    $($name => Some(&self.$field as &dyn $crate::Field),)*
                    _ => None,
                }
            }
            fn field_mut(&mut self, name: &str) -> Option<&mut dyn $crate::Field> {
                match name {
                    $($name => Some(&mut self.$field as &mut dyn $crate::Field),)*
                    _ => None,
                }
            }
        }

        impl $crate::Field for $ty {
            fn node(&self) -> $crate::Node<'_> { $crate::Node::Record(self) }
            fn node_mut(&mut self) -> $crate::NodeMut<'_> { $crate::NodeMut::Record(self) }
        }
    };
    ($ty:ident < $($g:ident),+ > { $($name:literal => $field:ident),* $(,)? }) => {
        impl<$($g: $crate::Field + Default),+> $crate::Record for $ty<$($g),+> {
            fn shape(&self) -> &'static str { stringify!($ty) }
            fn field_names(&self) -> &'static [&'static str] { &[$($name),*] }
            fn field(&self, name: &str) -> Option<&dyn $crate::Field> {
                match name {
                    $($name => Some(&self.$field as &dyn $crate::Field),)*
                    _ => None,
                }
            }
            fn field_mut(&mut self, name: &str) -> Option<&mut dyn $crate::Field> {
                match name {
                    $($name => Some(&mut self.$field as &mut dyn $crate::Field),)*
                    _ => None,
                }
            }
        }

        impl<$($g: $crate::Field + Default),+> $crate::Field for $ty<$($g),+> {
            fn node(&self) -> $crate::Node<'_> { $crate::Node::Record(self) }
            fn node_mut(&mut self) -> $crate::NodeMut<'_> { $crate::NodeMut::Record(self) }
        }
    };
}

/// A named string type with length facets and an optional content rule.
/// Plain text values are accepted on assignment and checked against the facets.
#[macro_export]
macro_rules! restricted_text {
    ($(#[$meta:meta])* $name:ident, $min:expr, $max:expr $(, $rule:expr, $what:literal)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn validate(&self) -> Result<(), $crate::Rejection> {
                let len = self.0.chars().count();
                if len < $min {
                    return Err($crate::Rejection::Constraint(format!("length {} below minimum {}", len, $min)));
                }
                if len > $max {
                    return Err($crate::Rejection::Constraint(format!("length {} exceeds maximum {}", len, $max)));
                }
                $(
                    let rule: fn(&str) -> bool = $rule;
                    if !rule(&self.0) {
                        return Err($crate::Rejection::Constraint(format!("'{}' is not {}", self.0, $what)));
                    }
                )?
                Ok(())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self { $name(s.to_string()) }
        }

        impl $crate::Scalar for $name {
            fn value(&self) -> $crate::Value { $crate::Value::Text(self.0.clone()) }
            fn assign(&mut self, value: $crate::Value) -> Result<(), $crate::Rejection> {
                match value {
                    $crate::Value::Text(s) => {
                        let candidate = $name(s);
                        candidate.validate()?;
                        *self = candidate;
                        Ok(())
                    }
                    other => Err($crate::Rejection::Kind { expected: $crate::Kind::Text, found: other.kind() }),
                }
            }
        }

        impl $crate::Field for $name {
            fn node(&self) -> $crate::Node<'_> { $crate::Node::Scalar(self) }
            fn node_mut(&mut self) -> $crate::NodeMut<'_> { $crate::NodeMut::Scalar(self) }
            fn check(&self) -> Result<(), $crate::Rejection> { self.validate() }
        }
    };
}

/// A string type restricted to a fixed set of codes.
#[macro_export]
macro_rules! code_set {
    ($(#[$meta:meta])* $name:ident { $($code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub const CODES: &'static [&'static str] = &[$($code),+];

            pub fn validate(&self) -> Result<(), $crate::Rejection> {
                if Self::CODES.contains(&self.0.as_str()) {
                    Ok(())
                } else {
                    Err($crate::Rejection::Constraint(format!("'{}' is not one of {}", self.0, Self::CODES.join(", "))))
                }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self { $name(s.to_string()) }
        }

        impl $crate::Scalar for $name {
            fn value(&self) -> $crate::Value { $crate::Value::Text(self.0.clone()) }
            fn assign(&mut self, value: $crate::Value) -> Result<(), $crate::Rejection> {
                match value {
                    $crate::Value::Text(s) => {
                        let candidate = $name(s);
                        candidate.validate()?;
                        *self = candidate;
                        Ok(())
                    }
                    other => Err($crate::Rejection::Kind { expected: $crate::Kind::Text, found: other.kind() }),
                }
            }
        }

        impl $crate::Field for $name {
            fn node(&self) -> $crate::Node<'_> { $crate::Node::Scalar(self) }
            fn node_mut(&mut self) -> $crate::NodeMut<'_> { $crate::NodeMut::Scalar(self) }
            fn check(&self) -> Result<(), $crate::Rejection> { self.validate() }
        }
    };
}
