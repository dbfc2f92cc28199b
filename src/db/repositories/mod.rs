mod discounts;
mod role_limits;
