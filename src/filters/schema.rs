use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Date,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Exact,
    IExact,
    Contains,
    IContains,
    StartsWith,
    IStartsWith,
    EndsWith,
    In,
    Gt,
    Gte,
    Lt,
    Lte,
    IsNull,
}

impl Lookup {
    pub fn parse(suffix: &str) -> Option<Self> {
        let lookup = match suffix {
            "exact" => Lookup::Exact,
            "iexact" => Lookup::IExact,
            "contains" => Lookup::Contains,
            "icontains" => Lookup::IContains,
            "startswith" => Lookup::StartsWith,
            "istartswith" => Lookup::IStartsWith,
            "endswith" => Lookup::EndsWith,
            "in" => Lookup::In,
            "gt" => Lookup::Gt,
            "gte" => Lookup::Gte,
            "lt" => Lookup::Lt,
            "lte" => Lookup::Lte,
            "isnull" => Lookup::IsNull,
            _ => return None,
        };
        Some(lookup)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lookup::Exact => "exact",
            Lookup::IExact => "iexact",
            Lookup::Contains => "contains",
            Lookup::IContains => "icontains",
            Lookup::StartsWith => "startswith",
            Lookup::IStartsWith => "istartswith",
            Lookup::EndsWith => "endswith",
            Lookup::In => "in",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::IsNull => "isnull",
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const TEXT_LOOKUPS: &[Lookup] = &[
    Lookup::Exact,
    Lookup::IExact,
    Lookup::Contains,
    Lookup::IContains,
    Lookup::StartsWith,
    Lookup::IStartsWith,
    Lookup::EndsWith,
    Lookup::In,
    Lookup::IsNull,
];

pub const ORDERED_LOOKUPS: &[Lookup] = &[
    Lookup::Exact,
    Lookup::In,
    Lookup::Gt,
    Lookup::Gte,
    Lookup::Lt,
    Lookup::Lte,
    Lookup::IsNull,
];

pub const BOOLEAN_LOOKUPS: &[Lookup] = &[Lookup::Exact];

/// One filterable field of a collection.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub lookups: &'static [Lookup],
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            lookups: TEXT_LOOKUPS,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            lookups: ORDERED_LOOKUPS,
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Date,
            lookups: ORDERED_LOOKUPS,
        }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Boolean,
            lookups: BOOLEAN_LOOKUPS,
        }
    }

    pub fn supports(&self, lookup: Lookup) -> bool {
        self.lookups.contains(&lookup)
    }
}

/// Resolves a filter name like `title__icontains` against a schema.
pub fn resolve_filter_name(
    schema: &'static [FieldSpec],
    name: &str,
) -> Option<(&'static FieldSpec, Lookup)> {
    let (field, lookup) = match name.split_once("__") {
        Some((field, suffix)) => (field, Lookup::parse(suffix)?),
        None => (name, Lookup::Exact),
    };
    let spec = schema.iter().find(|spec| spec.name == field)?;
    spec.supports(lookup).then_some((spec, lookup))
}
