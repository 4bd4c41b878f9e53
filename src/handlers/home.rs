/// GET / -> static welcome text.
pub async fn welcome() -> &'static str {
    "Welcome to the Juice Inventory\n"
}
