use diesel::prelude::*;

use crate::db::models::LanguageQualification;

pub struct LanguagesRepo;

impl LanguagesRepo {
    pub fn find_by_ids(
        conn: &mut PgConnection,
        ids: &[i32],
    ) -> Result<Vec<LanguageQualification>, diesel::result::Error> {
        use crate::schema::language_qualifications::dsl::*;
        language_qualifications
            .filter(id.eq_any(ids))
            .select(LanguageQualification::as_select())
            .order(id.asc())
            .load(conn)
    }
}
