use url::Url;

use super::schema::FieldSpec;

/// Prefix every collection endpoint is served under.
pub const API_PREFIX: &str = "/api/v1";

const POSITION_FILTERS: &[FieldSpec] = &[
    FieldSpec::integer("id"),
    FieldSpec::text("position_number"),
    FieldSpec::text("title"),
    FieldSpec::text("grade"),
    FieldSpec::text("skill"),
    FieldSpec::integer("post"),
    FieldSpec::boolean("is_available_in_current_bidcycle"),
];

const ORG_POST_FILTERS: &[FieldSpec] = &[
    FieldSpec::integer("id"),
    FieldSpec::text("location"),
    FieldSpec::integer("differential_rate"),
    FieldSpec::integer("danger_pay"),
];

const BID_CYCLE_FILTERS: &[FieldSpec] = &[
    FieldSpec::integer("id"),
    FieldSpec::text("name"),
    FieldSpec::boolean("active"),
    FieldSpec::date("cycle_start_date"),
    FieldSpec::date("cycle_deadline_date"),
    FieldSpec::date("cycle_end_date"),
];

/// Collection endpoints a saved search may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Position,
    OrgPost,
    BidCycle,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::Position, Endpoint::OrgPost, Endpoint::BidCycle];

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Position => "/api/v1/position/",
            Endpoint::OrgPost => "/api/v1/orgpost/",
            Endpoint::BidCycle => "/api/v1/bidcycle/",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Position => "position",
            Endpoint::OrgPost => "orgpost",
            Endpoint::BidCycle => "bidcycle",
        }
    }

    pub fn filter_schema(&self) -> &'static [FieldSpec] {
        match self {
            Endpoint::Position => POSITION_FILTERS,
            Endpoint::OrgPost => ORG_POST_FILTERS,
            Endpoint::BidCycle => BID_CYCLE_FILTERS,
        }
    }

    /// Resolves a stored endpoint string, either a path or an absolute URL.
    /// The query string and a missing trailing slash are ignored.
    pub fn resolve(endpoint: &str) -> Option<Endpoint> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return None;
        }
        let base = Url::parse("http://localhost/").ok()?;
        let url = base.join(endpoint).ok()?;
        let path = url.path().trim_end_matches('/');

        Endpoint::ALL
            .into_iter()
            .find(|candidate| candidate.path().trim_end_matches('/') == path)
    }

    /// Canonical URL of a single resource in this collection.
    pub fn detail_url(&self, base_url: &str, id: i32) -> String {
        format!("{}{}{}/", base_url.trim_end_matches('/'), self.path(), id)
    }
}
