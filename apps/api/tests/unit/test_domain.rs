use blog_api::domain::{
    blog::entity::BlogContent,
    policy::ownership::{Authorization, authorize, ensure_owner},
    shared::errors::ErrorKind,
    social::comment::CommentBody,
    user::value_objects::{Email, LoginIdentifier, Registration},
};
use uuid::Uuid;

#[test]
fn registration_reports_password_before_username() {
    let err = Registration::parse("x".into(), "x@example.com".into(), "ab".into()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert_eq!(err.field(), "password");
}

#[test]
fn registration_reports_username_before_email() {
    let err = Registration::parse("x".into(), "not-an-email".into(), "secret1".into()).unwrap_err();
    assert_eq!(err.field(), "username");
}

#[test]
fn registration_rejects_malformed_email() {
    let err = Registration::parse("alice".into(), "alice.example.com".into(), "secret1".into())
        .unwrap_err();
    assert_eq!(err.field(), "email");
    assert_eq!(err.message(), "Invalid Email");
}

#[test]
fn registration_accepts_boundary_lengths() {
    let registration =
        Registration::parse("abc".into(), "a@b.co".into(), "123456".into()).unwrap();
    assert_eq!(registration.username.value, "abc");
    assert!(Email::new("a@b".into()).is_ok());
}

#[test]
fn login_text_with_at_sign_is_an_email() {
    assert_eq!(
        LoginIdentifier::parse("a@b.com"),
        LoginIdentifier::Email("a@b.com".into())
    );
    assert_eq!(LoginIdentifier::parse("a@b.com").field(), "email");
    assert_eq!(
        LoginIdentifier::parse("alice"),
        LoginIdentifier::Username("alice".into())
    );
    assert_eq!(LoginIdentifier::parse("alice").field(), "username");
}

#[test]
fn only_the_owner_is_authorized() {
    let owner = Uuid::now_v7();
    let other = Uuid::now_v7();
    assert_eq!(authorize(owner, owner), Authorization::Allowed);
    assert_eq!(authorize(other, owner), Authorization::Denied);

    let err = ensure_owner(other, owner).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.field(), "userId");
    assert_eq!(err.message(), "User not authorized");
}

#[test]
fn blank_content_is_rejected() {
    assert_eq!(
        BlogContent::new(" ".into(), "d".into(), "b".into(), vec![])
            .unwrap_err()
            .field(),
        "title"
    );
    assert_eq!(CommentBody::new("\n".into()).unwrap_err().field(), "comment");
    assert_eq!(CommentBody::new(" hi ".into()).unwrap().value, "hi");
}
