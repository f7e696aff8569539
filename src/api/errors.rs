use rocket_contrib::json::Json;

#[catch(404)]
pub fn not_found() -> Json<serde_json::Value> {
    Json(json!({ "error": "Not found" }))
}

#[catch(422)]
pub fn unprocessable_entity() -> Json<serde_json::Value> {
    Json(json!({ "error": "Invalid request body" }))
}

#[catch(500)]
pub fn server_error() -> Json<serde_json::Value> {
    Json(json!({ "error": "Internal server error" }))
}
