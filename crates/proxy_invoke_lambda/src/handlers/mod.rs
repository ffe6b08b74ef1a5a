pub mod api_proxy;
