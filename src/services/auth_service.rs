use bcrypt::{hash, verify};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::{
        AuthUser, LoginRequest, LoginResponse, NewProfile, NewUser, RegisterRequest, User,
        error_codes,
    },
    db::repositories::{profiles::ProfilesRepo, users::UsersRepo},
    error::{AppError, AppResult},
    middleware::auth::JwtService,
    validation::auth::{normalize_email, validate_login_request},
};

pub struct AuthService;

impl AuthService {
    /// Creates the user and their empty profile in one transaction.
    pub fn register(
        conn: &mut PgConnection,
        req: &RegisterRequest,
        bcrypt_cost: u32,
    ) -> AppResult<User> {
        let email = normalize_email(&req.email);

        conn.transaction::<_, AppError, _>(|conn| {
            if UsersRepo::exists_by_email(conn, &email)? {
                return Err(AppError::conflict_with_code(
                    "Email already exists",
                    Some("email".to_string()),
                    error_codes::USER_EMAIL_EXISTS,
                ));
            }

            if UsersRepo::exists_by_username(conn, &req.username)? {
                return Err(AppError::conflict_with_code(
                    "Username already exists",
                    Some("username".to_string()),
                    error_codes::USER_USERNAME_EXISTS,
                ));
            }

            let password_hash = hash(&req.password, bcrypt_cost)?;

            let user = UsersRepo::insert(
                conn,
                &NewUser {
                    id: Uuid::new_v4(),
                    username: req.username.clone(),
                    email: email.clone(),
                    first_name: req.first_name.clone(),
                    last_name: req.last_name.clone(),
                    password_hash,
                },
            )?;
            let profile = ProfilesRepo::insert(conn, &NewProfile { user_id: user.id })?;

            tracing::info!(user_id = %user.id, profile_id = profile.id, "User registered");
            Ok(user)
        })
    }

    pub fn login(
        conn: &mut PgConnection,
        jwt: &JwtService,
        req: &LoginRequest,
    ) -> AppResult<LoginResponse> {
        validate_login_request(&req.email, &req.password)?;

        let user = UsersRepo::find_by_email(conn, &normalize_email(&req.email))?
            .filter(|user| user.is_active)
            .ok_or_else(|| AppError::auth("Invalid email or password"))?;

        if !verify(&req.password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Rejected login with wrong password");
            return Err(AppError::auth("Invalid email or password"));
        }

        let auth_user = AuthUser {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
        };
        let access_token = jwt.generate_access_token(&auth_user)?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.expires_in(),
            user: auth_user,
        })
    }
}
