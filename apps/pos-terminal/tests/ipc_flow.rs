//! Drives the terminal through whole cashier sessions, one JSON line at a time.

use ibstock_terminal::ipc::Terminal;
use ibstock_terminal::state::ConfigState;
use serde_json::{json, Value};

fn terminal(seed: u64) -> Terminal {
    let config = ConfigState {
        receipt_seed: Some(seed),
        ..ConfigState::default()
    };
    Terminal::new(config).unwrap()
}

fn send(terminal: &Terminal, request: Value) -> Value {
    let reply = terminal.handle_line(&request.to_string());
    serde_json::to_value(reply).unwrap()
}

fn ok(terminal: &Terminal, request: Value) -> Value {
    let reply = send(terminal, request.clone());
    assert_eq!(reply["ok"], true, "{request} -> {reply}");
    reply["data"].clone()
}

fn sign_in_seller(terminal: &Terminal) {
    let user = ok(
        terminal,
        json!({"command": "login", "email": "seller@ibstock.com", "password": "password123"}),
    );
    assert_eq!(user["role"], "seller");
    assert_eq!(user["home"], "pos");
}

#[test]
fn test_cash_sale_end_to_end() {
    let t = terminal(42);
    sign_in_seller(&t);

    let cart = ok(&t, json!({"command": "add_to_cart", "productId": "p1"}));
    assert_eq!(cart["notices"][0]["message"], "Arroz Pérola 1kg added to cart");
    assert_eq!(cart["notices"][0]["severity"], "success");

    let cart = ok(
        &t,
        json!({"command": "update_cart_item", "productId": "p1", "quantity": 5}),
    );
    assert_eq!(cart["lines"][0]["quantity"], 5);
    assert_eq!(cart["totalDisplay"], "500.00 MT");

    let checkout = ok(&t, json!({"command": "open_checkout"}));
    assert_eq!(checkout["phase"], "open");
    assert_eq!(checkout["paymentMethod"], "cash");

    ok(&t, json!({"command": "set_amount_tendered", "amount": "400"}));
    let rejected = ok(&t, json!({"command": "confirm_payment"}));
    assert_eq!(rejected["notices"][0]["severity"], "error");
    assert!(rejected["sale"].is_null());
    assert_eq!(rejected["phase"], "open");

    let checkout = ok(&t, json!({"command": "set_amount_tendered", "amount": "600"}));
    assert_eq!(checkout["changeDisplay"], "100.00 MT");
    assert_eq!(checkout["canCommit"], true);

    let done = ok(&t, json!({"command": "confirm_payment"}));
    let receipt = done["sale"]["receiptNumber"].as_str().unwrap();
    assert_eq!(receipt.len(), 5);
    assert!(receipt.starts_with('V'));
    assert!(receipt[1..].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(
        done["notices"][0]["message"],
        format!("Sale completed. Receipt: {receipt}")
    );
    assert_eq!(done["phase"], "closed");

    let cart = ok(&t, json!({"command": "get_cart"}));
    assert_eq!(cart["itemCount"], 0);
    assert_eq!(cart["lines"], json!([]));
}

#[test]
fn test_stock_ceiling_and_customer() {
    let t = terminal(1);
    sign_in_seller(&t);

    ok(&t, json!({"command": "update_cart_item", "productId": "p8", "quantity": 1}));
    ok(&t, json!({"command": "add_to_cart", "productId": "p8"}));
    let cart = ok(
        &t,
        json!({"command": "update_cart_item", "productId": "p8", "quantity": 9}),
    );
    assert_eq!(cart["lines"][0]["quantity"], 1);
    assert_eq!(cart["notices"][0]["severity"], "error");

    let customer = ok(&t, json!({"command": "select_customer", "customerId": "c2"}));
    assert_eq!(customer["selected"]["hasOutstandingCredit"], true);

    // Clearing the cart leaves the customer attached.
    let cart = ok(&t, json!({"command": "clear_cart"}));
    assert_eq!(cart["notices"][0]["message"], "Cart cleared");
    let checkout = ok(&t, json!({"command": "open_checkout"}));
    assert_eq!(checkout["phase"], "closed");
    assert_eq!(checkout["notices"][0]["severity"], "error");
}

#[test]
fn test_filters_persist_between_listings() {
    let t = terminal(3);
    sign_in_seller(&t);

    ok(&t, json!({"command": "set_category", "category": "beverages"}));
    let list = ok(&t, json!({"command": "set_search", "term": "cola"}));
    assert_eq!(list["products"].as_array().unwrap().len(), 1);

    let list = ok(&t, json!({"command": "list_products"}));
    assert_eq!(list["products"][0]["id"], "p5");
}

#[test]
fn test_access_rules() {
    let t = terminal(5);

    let reply = send(&t, json!({"command": "add_to_cart", "productId": "p1"}));
    assert_eq!(reply["ok"], false);
    assert_eq!(reply["error"]["code"], "UNAUTHORIZED");

    let reply = send(
        &t,
        json!({"command": "login", "email": "seller@ibstock.com", "password": "nope"}),
    );
    assert_eq!(reply["error"]["code"], "INVALID_CREDENTIALS");

    sign_in_seller(&t);
    ok(&t, json!({"command": "add_to_cart", "productId": "p2"}));

    let signed_out = ok(&t, json!({"command": "logout"}));
    assert_eq!(signed_out["signedOut"], true);
    assert!(ok(&t, json!({"command": "whoami"})).is_null());

    // The cart survives a sign-out.
    sign_in_seller(&t);
    let cart = ok(&t, json!({"command": "get_cart"}));
    assert_eq!(cart["itemCount"], 1);
}

#[test]
fn test_malformed_lines() {
    let t = terminal(9);

    let reply = serde_json::to_value(t.handle_line("{not json")).unwrap();
    assert_eq!(reply["ok"], false);
    assert_eq!(reply["error"]["code"], "BAD_REQUEST");

    let reply = send(&t, json!({"command": "update_cart_item", "productId": "p1"}));
    assert_eq!(reply["error"]["code"], "BAD_REQUEST");
}

#[test]
fn test_same_seed_same_receipt() {
    let receipts: Vec<String> = (0..2)
        .map(|_| {
            let t = terminal(2024);
            sign_in_seller(&t);
            ok(&t, json!({"command": "add_to_cart", "productId": "p9"}));
            ok(&t, json!({"command": "open_checkout"}));
            ok(&t, json!({"command": "set_payment_method", "method": "card"}));
            let done = ok(&t, json!({"command": "confirm_payment"}));
            done["sale"]["receiptNumber"].as_str().unwrap().to_string()
        })
        .collect();

    assert_eq!(receipts[0], receipts[1]);
}
