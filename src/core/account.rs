//! Account business logic - Dashboard logins, team management and affiliate balances.
//!
//! Credentials are compared as plaintext, matching the storefront's login form. Team
//! management is reserved to admins, and an affiliate's balance only ever grows through
//! [`credit_commission`].

use crate::{
    entities::{AdminUser, LandingPage, Order, Role, admin_user, landing_page, order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument, warn};

/// Looks up the account matching a username/password pair.
///
/// # Errors
/// Returns `Error::InvalidCredentials` when no account matches, or a database error.
#[instrument(skip(db, password))]
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<admin_user::Model> {
    let account = AdminUser::find()
        .filter(admin_user::Column::Username.eq(username))
        .one(db)
        .await?;

    match account {
        Some(account) if account.password == password => {
            info!(account_id = account.id, "Login succeeded");
            Ok(account)
        }
        _ => {
            warn!("Login rejected for username '{}'", username);
            Err(Error::InvalidCredentials)
        }
    }
}

/// Retrieves an account by id.
pub async fn get_account_by_id<C>(db: &C, account_id: i64) -> Result<Option<admin_user::Model>>
where
    C: ConnectionTrait,
{
    AdminUser::find_by_id(account_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an account by username.
pub async fn get_account_by_username<C>(
    db: &C,
    username: &str,
) -> Result<Option<admin_user::Model>>
where
    C: ConnectionTrait,
{
    AdminUser::find()
        .filter(admin_user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts an account without any permission check, validating only its fields.
///
/// Used by seeding and by [`create_account`] once the requester has been authorised.
pub(crate) async fn insert_account<C>(
    db: &C,
    username: &str,
    password: &str,
    name: &str,
    role: Role,
) -> Result<admin_user::Model>
where
    C: ConnectionTrait,
{
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::Validation {
            message: "Username cannot be empty".to_string(),
        });
    }
    if password.is_empty() {
        return Err(Error::Validation {
            message: "Password cannot be empty".to_string(),
        });
    }
    if get_account_by_username(db, username).await?.is_some() {
        return Err(Error::Validation {
            message: format!("Username '{username}' is already taken"),
        });
    }

    let account = admin_user::ActiveModel {
        username: Set(username.to_string()),
        password: Set(password.to_string()),
        role: Set(role),
        name: Set(name.trim().to_string()),
        balance: Set(0),
        ..Default::default()
    };
    account.insert(db).await.map_err(Into::into)
}

/// Adds a team member. Only admins may do this.
///
/// # Errors
/// Returns `Error::PermissionDenied` for non-admin requesters, `Error::Validation` for an
/// empty or duplicate username or an empty password, or a database error.
#[instrument(skip(db, requester, password), fields(requester_id = requester.id))]
pub async fn create_account(
    db: &DatabaseConnection,
    requester: &admin_user::Model,
    username: &str,
    password: &str,
    name: &str,
    role: Role,
) -> Result<admin_user::Model> {
    require_admin(requester, "only admins can add team members")?;

    let account = insert_account(db, username, password, name, role).await?;
    info!(
        account_id = account.id,
        "Added team member '{}' with role {:?}", account.username, account.role
    );
    Ok(account)
}

/// Removes a team member together with their landing pages.
///
/// Orders the member referred stay in the history but lose their referral link.
///
/// # Errors
/// Returns `Error::PermissionDenied` for non-admin requesters, `Error::AccountNotFound`
/// for an unknown id, `Error::LastAdmin` when the target is the only admin left, or a
/// database error.
#[instrument(skip(db, requester), fields(requester_id = requester.id))]
pub async fn delete_account(
    db: &DatabaseConnection,
    requester: &admin_user::Model,
    account_id: i64,
) -> Result<()> {
    require_admin(requester, "only admins can remove team members")?;

    let txn = db.begin().await?;

    let account = get_account_by_id(&txn, account_id)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })?;

    if account.is_admin() {
        let admins = AdminUser::find()
            .filter(admin_user::Column::Role.eq(Role::Admin))
            .count(&txn)
            .await?;
        if admins <= 1 {
            return Err(Error::LastAdmin);
        }
    }

    LandingPage::delete_many()
        .filter(landing_page::Column::AffiliateId.eq(account_id))
        .exec(&txn)
        .await?;
    Order::update_many()
        .col_expr(order::Column::ReferralId, Expr::value(Option::<i64>::None))
        .filter(order::Column::ReferralId.eq(account_id))
        .exec(&txn)
        .await?;
    AdminUser::delete_by_id(account_id).exec(&txn).await?;

    txn.commit().await?;
    info!("Removed team member '{}'", account.username);
    Ok(())
}

/// Lists every account, ordered by id. Admin only.
pub async fn list_accounts(
    db: &DatabaseConnection,
    requester: &admin_user::Model,
) -> Result<Vec<admin_user::Model>> {
    require_admin(requester, "only admins can view the team")?;

    AdminUser::find()
        .order_by_asc(admin_user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Current balance of the given user, read fresh from the store.
pub async fn get_balance(db: &DatabaseConnection, user: &admin_user::Model) -> Result<i64> {
    get_account_by_id(db, user.id)
        .await?
        .map(|account| account.balance)
        .ok_or(Error::AccountNotFound { id: user.id })
}

/// Adds a commission to an affiliate's balance with a single atomic UPDATE.
///
/// The balance is an accumulator, so only strictly positive amounts are accepted.
/// Pass a transaction as `db` to make the credit part of a larger write.
pub async fn credit_commission<C>(
    db: &C,
    account_id: i64,
    amount: i64,
) -> Result<admin_user::Model>
where
    C: ConnectionTrait,
{
    if amount <= 0 {
        return Err(Error::Validation {
            message: format!("Commission must be positive, got {amount}"),
        });
    }

    let result = AdminUser::update_many()
        .col_expr(
            admin_user::Column::Balance,
            Expr::col(admin_user::Column::Balance).add(amount),
        )
        .filter(admin_user::Column::Id.eq(account_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::AccountNotFound { id: account_id });
    }

    get_account_by_id(db, account_id)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })
}

fn require_admin(requester: &admin_user::Model, message: &str) -> Result<()> {
    if requester.is_admin() {
        Ok(())
    } else {
        Err(Error::PermissionDenied {
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_authenticate() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;

        let found = authenticate(&db, "admin", TEST_PASSWORD).await?;
        assert_eq!(found.id, admin.id);

        let wrong_password = authenticate(&db, "admin", "nope").await;
        assert!(matches!(wrong_password, Err(Error::InvalidCredentials)));

        let unknown_user = authenticate(&db, "ghost", TEST_PASSWORD).await;
        assert!(matches!(unknown_user, Err(Error::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_requires_admin() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let affiliate = test_account(2, Role::Manager);

        let result = create_account(&db, &affiliate, "new", "pw", "New", Role::Manager).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::PermissionDenied { message: _ }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;

        let account =
            create_account(&db, &admin, "  samir ", "secret", "Samir", Role::Manager).await?;
        assert_eq!(account.username, "samir");
        assert_eq!(account.role, Role::Manager);
        assert_eq!(account.balance, 0);

        let duplicate = create_account(&db, &admin, "samir", "x", "Dup", Role::Manager).await;
        assert!(matches!(duplicate, Err(Error::Validation { message: _ })));

        let empty = create_account(&db, &admin, "   ", "x", "Empty", Role::Manager).await;
        assert!(matches!(empty, Err(Error::Validation { message: _ })));

        let team = list_accounts(&db, &admin).await?;
        assert_eq!(team.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_accounts_denied_for_affiliate() -> Result<()> {
        let db = setup_test_db().await?;
        let affiliate = create_test_affiliate(&db, "aff").await?;
        let result = list_accounts(&db, &affiliate).await;
        assert!(matches!(result, Err(Error::PermissionDenied { message: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_account_keeps_last_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;
        let affiliate = create_test_affiliate(&db, "aff").await?;

        let result = delete_account(&db, &admin, admin.id).await;
        assert!(matches!(result, Err(Error::LastAdmin)));

        delete_account(&db, &admin, affiliate.id).await?;
        assert!(get_account_by_id(&db, affiliate.id).await?.is_none());

        let missing = delete_account(&db, &admin, affiliate.id).await;
        assert!(matches!(missing, Err(Error::AccountNotFound { id: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_second_admin_allowed() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;
        let other = create_account(&db, &admin, "boss2", "pw", "Boss", Role::Admin).await?;

        delete_account(&db, &admin, other.id).await?;
        assert_eq!(list_accounts(&db, &admin).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_credit_commission() -> Result<()> {
        let db = setup_test_db().await?;
        let affiliate = create_test_affiliate(&db, "aff").await?;

        let updated = credit_commission(&db, affiliate.id, 2000).await?;
        assert_eq!(updated.balance, 2000);
        let updated = credit_commission(&db, affiliate.id, 500).await?;
        assert_eq!(updated.balance, 2500);
        assert_eq!(get_balance(&db, &affiliate).await?, 2500);

        // The accumulator never decreases
        let negative = credit_commission(&db, affiliate.id, -100).await;
        assert!(matches!(negative, Err(Error::Validation { message: _ })));
        let zero = credit_commission(&db, affiliate.id, 0).await;
        assert!(matches!(zero, Err(Error::Validation { message: _ })));
        assert_eq!(get_balance(&db, &affiliate).await?, 2500);

        let unknown = credit_commission(&db, 9999, 10).await;
        assert!(matches!(unknown, Err(Error::AccountNotFound { id: 9999 })));
        Ok(())
    }
}
