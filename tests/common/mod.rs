//! Mock of the recipe, auth and cart APIs served by actix-web on an ephemeral
//! port, so the real HTTP clients can be exercised end to end.
#![allow(dead_code)]

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

pub const USERNAME: &str = "emilys";
pub const PASSWORD: &str = "emilyspass";
pub const TOKEN: &str = "mock-access-token";

#[derive(Default)]
pub struct MockState {
    pub carts: Mutex<Vec<Value>>,
    pub cart_attempts: Mutex<usize>,
    pub failing_cart_ids: Mutex<HashSet<u64>>,
    pub ratings_received: Mutex<Vec<Value>>,
    pub catalog_down: Mutex<bool>,
    pub profile_down: Mutex<bool>,
}

pub struct MockServer {
    pub base_url: String,
    pub state: web::Data<MockState>,
    handle: ServerHandle,
}

impl MockServer {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub fn recipes() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Classic Margherita Pizza",
            "image": "https://cdn.example.com/recipe-images/1.webp",
            "rating": 4.6,
            "tags": ["Pizza", "Italian"],
            "ingredients": ["Pizza dough", "Tomato sauce", "Fresh mozzarella"],
            "instructions": ["Preheat the oven", "Spread the sauce", "Bake"],
            "cuisine": "Italian",
            "difficulty": "Easy"
        }),
        json!({
            "id": 2,
            "name": "Vegetarian Stir-Fry",
            "image": "https://cdn.example.com/recipe-images/2.webp",
            "rating": 4.7,
            "tags": ["Vegetarian", "Stir-fry", "Asian"],
            "ingredients": ["Tofu", "Broccoli"],
            "instructions": ["Fry the tofu", "Add vegetables"],
            "cuisine": "Asian"
        }),
        json!({
            "id": 3,
            "name": "Chocolate Chip Cookies",
            "image": "https://cdn.example.com/recipe-images/3.webp",
            "rating": 4.9,
            "tags": ["Cookies", "Dessert"],
            "ingredients": ["Flour", "Chocolate chips"],
            "instructions": ["Mix", "Bake"],
            "cuisine": "American"
        }),
        json!({
            "id": 4,
            "name": "Pizza Bianca",
            "rating": 4.1,
            "tags": null,
            "cuisine": "Italian"
        }),
    ]
}

async fn list_recipes(state: web::Data<MockState>) -> HttpResponse {
    if *state.catalog_down.lock().unwrap() {
        return HttpResponse::InternalServerError().json(json!({ "message": "down" }));
    }
    let recipes = recipes();
    HttpResponse::Ok().json(json!({ "recipes": recipes, "total": recipes.len(), "skip": 0, "limit": 30 }))
}

async fn list_tags(state: web::Data<MockState>) -> HttpResponse {
    if *state.catalog_down.lock().unwrap() {
        return HttpResponse::InternalServerError().json(json!({ "message": "down" }));
    }
    HttpResponse::Ok().json(json!(["American", "Asian", "Cookies", "Dessert", "Italian", "Pizza"]))
}

async fn get_recipe(path: web::Path<u64>) -> HttpResponse {
    let id = path.into_inner();
    match recipes().into_iter().find(|r| r["id"] == id) {
        Some(recipe) => HttpResponse::Ok().json(recipe),
        None => HttpResponse::NotFound().json(json!({ "message": format!("Recipe with id '{}' not found", id) })),
    }
}

async fn rate_recipe(state: web::Data<MockState>, path: web::Path<u64>, body: web::Json<Value>) -> HttpResponse {
    let id = path.into_inner();
    let body = body.into_inner();
    state.ratings_received.lock().unwrap().push(body.clone());
    let Some(submitted) = body["rating"].as_f64() else {
        return HttpResponse::BadRequest().json(json!({ "message": "rating required" }));
    };
    let Some(recipe) = recipes().into_iter().find(|r| r["id"] == id) else {
        return HttpResponse::NotFound().finish();
    };
    // The server folds the vote into its own average.
    let current = recipe["rating"].as_f64().unwrap_or(0.0);
    let rating = ((current + submitted) / 2.0 * 100.0).round() / 100.0;
    HttpResponse::Ok().json(json!({ "id": id, "rating": rating, "name": recipe["name"] }))
}

async fn login(body: web::Json<Value>) -> HttpResponse {
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        HttpResponse::Ok().json(json!({
            "id": 1,
            "username": USERNAME,
            "token": TOKEN,
            "accessToken": TOKEN,
            "refreshToken": "mock-refresh-token"
        }))
    } else {
        HttpResponse::BadRequest().json(json!({ "message": "Invalid credentials" }))
    }
}

async fn profile(state: web::Data<MockState>, req: HttpRequest) -> HttpResponse {
    if *state.profile_down.lock().unwrap() {
        return HttpResponse::ServiceUnavailable().finish();
    }
    let authorized = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false);
    if !authorized {
        return HttpResponse::Unauthorized().json(json!({ "message": "Invalid/expired Token!" }));
    }
    HttpResponse::Ok().json(profile_body())
}

pub fn profile_body() -> Value {
    json!({
        "id": 1,
        "username": USERNAME,
        "firstName": "Emily",
        "lastName": "Johnson",
        "email": "emily.johnson@x.dummyjson.com"
    })
}

async fn create_cart(state: web::Data<MockState>, body: web::Json<Value>) -> HttpResponse {
    *state.cart_attempts.lock().unwrap() += 1;
    let body = body.into_inner();
    let id = body["id"].as_u64();
    if let Some(id) = id {
        if state.failing_cart_ids.lock().unwrap().contains(&id) {
            return HttpResponse::InternalServerError().finish();
        }
    }
    if id.is_none() {
        return HttpResponse::BadRequest().json(json!({ "message": "numeric id required" }));
    }
    state.carts.lock().unwrap().push(body.clone());
    HttpResponse::Created().json(body)
}

pub async fn start() -> MockServer {
    let state = web::Data::new(MockState::default());
    let app_state = state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/recipes", web::get().to(list_recipes))
            .route("/recipes/tags", web::get().to(list_tags))
            .route("/recipes/{id}", web::get().to(get_recipe))
            .route("/recipes/{id}/rate", web::post().to(rate_recipe))
            .route("/auth/login", web::post().to(login))
            .route("/user", web::get().to(profile))
            .route("/carts", web::post().to(create_cart))
    })
    .workers(1)
    .disable_signals()
    .shutdown_timeout(1)
    .bind(("127.0.0.1", 0))
    .expect("bind mock server");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    MockServer {
        base_url: format!("http://{}", addr),
        state,
        handle,
    }
}

pub fn http_client() -> reqwest::Client {
    recipe_catalog::data::http::build_client(Duration::from_secs(5)).expect("client")
}
