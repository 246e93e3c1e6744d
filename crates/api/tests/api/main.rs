mod date_routes;
