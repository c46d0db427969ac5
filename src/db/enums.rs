use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Bid lifecycle. Stored in snake_case; rows written before the status
/// normalization migration used spaces (`handshake offered`), both read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Draft,
    Submitted,
    #[serde(alias = "handshake offered")]
    HandshakeOffered,
    #[serde(alias = "handshake accepted")]
    HandshakeAccepted,
    Declined,
    Closed,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Draft => "draft",
            BidStatus::Submitted => "submitted",
            BidStatus::HandshakeOffered => "handshake_offered",
            BidStatus::HandshakeAccepted => "handshake_accepted",
            BidStatus::Declined => "declined",
            BidStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(BidStatus::Draft),
            "submitted" => Some(BidStatus::Submitted),
            "handshake_offered" | "handshake offered" => Some(BidStatus::HandshakeOffered),
            "handshake_accepted" | "handshake accepted" => Some(BidStatus::HandshakeAccepted),
            "declined" => Some(BidStatus::Declined),
            "closed" => Some(BidStatus::Closed),
            _ => None,
        }
    }

    /// Statuses at or past a handshake offer. A bid in one of these takes its
    /// position out of the current cycle's available pool.
    pub fn blocking() -> [BidStatus; 2] {
        [BidStatus::HandshakeOffered, BidStatus::HandshakeAccepted]
    }
}

impl FromSql<Text, Pg> for BidStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        BidStatus::parse(&s).ok_or_else(|| "Unrecognized enum variant".into())
    }
}

impl ToSql<Text, Pg> for BidStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

/// Kinds of object that can be shared between users. The tag is what gets
/// stored in `sharables.sharable_model` and what clients send as `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum SharableKind {
    Position,
}

impl SharableKind {
    pub const ALL: [SharableKind; 1] = [SharableKind::Position];

    pub fn as_str(&self) -> &'static str {
        match self {
            SharableKind::Position => "position",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        SharableKind::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl FromSql<Text, Pg> for SharableKind {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        // "position.Position" is the legacy app-label form
        let tag = s.split('.').next().unwrap_or_default();
        SharableKind::parse(tag).ok_or_else(|| "Unrecognized enum variant".into())
    }
}

impl ToSql<Text, Pg> for SharableKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareMode {
    Email,
    Internal,
}

impl ShareMode {
    pub const ALL: [ShareMode; 2] = [ShareMode::Email, ShareMode::Internal];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShareMode::Email => "email",
            ShareMode::Internal => "internal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        ShareMode::ALL.into_iter().find(|mode| mode.as_str() == value)
    }
}
