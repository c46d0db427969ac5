use serde::Serialize;

// Uniform response envelope
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

/// Paginated collection, rendered inside `data`.
#[derive(Serialize, Debug)]
pub struct Page<T> {
    pub count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Slices an already filtered, ordered collection. `page` is 1-based.
    pub fn from_vec(items: Vec<T>, page: i64, limit: i64) -> Self {
        let limit = limit.max(1);
        let page = page.max(1);
        let count = items.len() as i64;
        let total_pages = count / limit + i64::from(count % limit != 0);
        let offset = usize::try_from(page.saturating_sub(1).saturating_mul(limit)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        let results: Vec<T> = items.into_iter().skip(offset).take(take).collect();

        Self {
            count,
            page,
            limit,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
            results,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 201,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn accepted(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 202,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: u16, message: &str, errors: Vec<ErrorDetail>) -> Self {
        Self {
            success: false,
            code,
            message: message.to_string(),
            data: None,
            errors: Some(errors),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::error(
            401,
            message,
            vec![ErrorDetail {
                field: None,
                code: "UNAUTHORIZED".to_string(),
                message: message.to_string(),
            }],
        )
    }

    pub fn not_found(message: &str) -> Self {
        Self::error(
            404,
            message,
            vec![ErrorDetail {
                field: None,
                code: "NOT_FOUND".to_string(),
                message: message.to_string(),
            }],
        )
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::error(
            409,
            message,
            vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }],
        )
    }

    pub fn bad_request(message: &str, field: Option<String>) -> Self {
        Self::error(
            400,
            message,
            vec![ErrorDetail {
                field,
                code: "BAD_REQUEST".to_string(),
                message: message.to_string(),
            }],
        )
    }

    pub fn internal_error(message: &str) -> Self {
        Self::error(
            500,
            message,
            vec![ErrorDetail {
                field: None,
                code: "INTERNAL_ERROR".to_string(),
                message: message.to_string(),
            }],
        )
    }
}

// Business error codes
pub mod error_codes {
    pub const USER_EMAIL_EXISTS: &str = "USER_001";
    pub const USER_USERNAME_EXISTS: &str = "USER_002";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_slices_and_reports_navigation() {
        let page = Page::from_vec((1..=12).collect::<Vec<i32>>(), 2, 5);
        assert_eq!(page.count, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results, vec![6, 7, 8, 9, 10]);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = Page::from_vec(vec!["a", "b"], 4, 10);
        assert_eq!(page.count, 2);
        assert!(page.results.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = Page::from_vec(vec![1, 2, 3], i64::MAX, 20);
        assert_eq!(page.page, i64::MAX);
        assert_eq!(page.total_pages, 1);
        assert!(page.results.is_empty());
        assert!(!page.has_next);
        assert!(page.has_prev);

        let page = Page::from_vec(vec![1, 2, 3], 1, i64::MAX);
        assert_eq!(page.results, vec![1, 2, 3]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn envelope_skips_absent_data() {
        let body = serde_json::to_value(ApiResponse::<()>::not_found("gone")).unwrap();
        assert_eq!(body["code"], 404);
        assert!(body.get("data").is_none());
        assert_eq!(body["errors"][0]["code"], "NOT_FOUND");
    }
}
