pub mod order_query_service;
