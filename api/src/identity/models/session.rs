use std::ops::Add;

use base64::Engine;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use rand::Rng;

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession {
    pub token: String,
    pub active: bool,
    pub issued_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewSession {
    pub fn new_with_user_id(user_id: &str) -> NewSession {
        let mut token_bytes = [0u8; 96];
        rand::rng().fill_bytes(&mut token_bytes);

        let token =
            "tsum_".to_owned() + &base64::engine::general_purpose::STANDARD.encode(token_bytes);

        let now = chrono::Utc::now().naive_utc();

        NewSession {
            active: true,
            token,
            issued_at: now,
            expires_at: now.add(chrono::Duration::try_days(365).unwrap_or_else(|| {
                tracing::error!("Could not convert 365 to days, using default");
                chrono::Duration::default()
            })),
            user_id: user_id.to_owned(),
            created_at: now,
            updated_at: now,
        }
    }
}
