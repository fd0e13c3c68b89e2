// Unit tests for error mapping - pure domain logic without HTTP plumbing
use crate::errors::domain::{
    AuthFailure, ConflictKind, DomainError, InfraErrorKind, MoveRejection, NotFoundKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn unknown_game_maps_to_400() {
    let app: AppError = DomainError::game_not_found("abc").into();
    assert_eq!(app.code(), ErrorCode::GameNotFound);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(app.detail(), "game abc does not exist");
}

#[test]
fn maps_conflicts() {
    let full: AppError = DomainError::conflict(ConflictKind::GameFull, "game already full").into();
    assert_eq!(full.code().as_str(), "GAME_FULL");
    assert_eq!(full.status().as_u16(), 400);

    let taken: AppError =
        DomainError::conflict(ConflictKind::UsernameTaken, "user with username x exists").into();
    assert_eq!(taken.code(), ErrorCode::UsernameTaken);
}

#[test]
fn maps_move_rejections() {
    let cases = [
        (MoveRejection::GameNotStarted, ErrorCode::GameNotStarted),
        (MoveRejection::NotAParticipant, ErrorCode::NotAParticipant),
        (MoveRejection::WrongTurn("black"), ErrorCode::WrongTurn),
        (MoveRejection::IllegalMove("e5".into()), ErrorCode::IllegalMove),
        (MoveRejection::GameOver, ErrorCode::GameOver),
    ];

    for (rejection, expected) in cases {
        let app: AppError = DomainError::rejected(rejection).into();
        assert_eq!(app.code(), expected);
        assert_eq!(app.status().as_u16(), 400);
    }
}

#[test]
fn maps_unauthenticated_to_400() {
    let app: AppError = DomainError::unauthenticated(AuthFailure::Missing).into();
    assert_eq!(app.code(), ErrorCode::Unauthenticated);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(app.detail(), "user has no JWT");

    let app: AppError = DomainError::unauthenticated(AuthFailure::Expired).into();
    assert_eq!(app.code(), ErrorCode::ExpiredToken);
}

#[test]
fn maps_not_found_user() {
    let app: AppError = DomainError::not_found(NotFoundKind::User, "user not found").into();
    assert_eq!(app.code(), ErrorCode::UserNotFound);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_infra_to_500() {
    let app: AppError = DomainError::infra(InfraErrorKind::IdGeneration, "os rng").into();
    assert_eq!(app.code(), ErrorCode::IdGeneration);
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::Other("x".into()), "other").into();
    assert_eq!(app.code(), ErrorCode::Internal);
    assert_eq!(app.status().as_u16(), 500);
}
