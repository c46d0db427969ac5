use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::language_qualifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LanguageQualification {
    pub id: i32,
    pub language: String,
    pub spoken_proficiency: String,
    pub reading_proficiency: String,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::language_qualifications)]
pub struct NewLanguageQualification {
    pub language: String,
    pub spoken_proficiency: String,
    pub reading_proficiency: String,
}

impl LanguageQualification {
    pub fn representation(&self) -> String {
        format!(
            "{} {}/{}",
            self.language, self.spoken_proficiency, self.reading_proficiency
        )
    }
}
