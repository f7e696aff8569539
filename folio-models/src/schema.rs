table! {
    authors (id) {
        id -> Int4,
        pen_name -> Varchar,
        bio -> Nullable<Text>,
        user_id -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    comments (id) {
        id -> Int4,
        content -> Text,
        user_id -> Int4,
        post_id -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    notification_recipients (id) {
        id -> Int4,
        notification_id -> Int4,
        user_id -> Int4,
        is_read -> Bool,
        created_at -> Timestamp,
    }
}

table! {
    notifications (id) {
        id -> Int4,
        recipient_id -> Int4,
        kind -> Varchar,
        object_id -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    post_reports (id) {
        id -> Int4,
        user_id -> Int4,
        post_id -> Int4,
        reason -> Nullable<Text>,
        status -> Varchar,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    posts (id) {
        id -> Int4,
        title -> Varchar,
        content -> Text,
        cover_url -> Nullable<Varchar>,
        credit -> Nullable<Varchar>,
        sale_url -> Nullable<Varchar>,
        status -> Varchar,
        author_id -> Nullable<Int4>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    reactions (id) {
        id -> Int4,
        kind -> Varchar,
        user_id -> Int4,
        post_id -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Int4,
        email -> Varchar,
        hashed_password -> Varchar,
        phone -> Nullable<Varchar>,
        role -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    users_follow_authors (id) {
        id -> Int4,
        user_id -> Int4,
        author_id -> Int4,
        created_at -> Timestamp,
    }
}

joinable!(authors -> users (user_id));
joinable!(comments -> posts (post_id));
joinable!(comments -> users (user_id));
joinable!(notification_recipients -> notifications (notification_id));
joinable!(notification_recipients -> users (user_id));
joinable!(notifications -> users (recipient_id));
joinable!(post_reports -> posts (post_id));
joinable!(post_reports -> users (user_id));
joinable!(posts -> authors (author_id));
joinable!(reactions -> posts (post_id));
joinable!(reactions -> users (user_id));
joinable!(users_follow_authors -> authors (author_id));
joinable!(users_follow_authors -> users (user_id));

allow_tables_to_appear_in_same_query!(
    authors,
    comments,
    notification_recipients,
    notifications,
    post_reports,
    posts,
    reactions,
    users,
    users_follow_authors,
);
