proto_enum! {
    /// Lifecycle state of an order
    pub enum OrderStatus = "seiprotocol.seichain.dex.OrderStatus" {
        Placed = 0 => "PLACED",
        FailedToPlace = 1 => "FAILED_TO_PLACE",
        Cancelled = 2 => "CANCELLED",
        Fulfilled = 3 => "FULFILLED",
    }
}

proto_enum! {
    pub enum OrderType = "seiprotocol.seichain.dex.OrderType" {
        Limit = 0 => "LIMIT",
        Market = 1 => "MARKET",
        /// Fill-or-kill market order by quantity
        Fokmarket = 3 => "FOKMARKET",
        /// Fill-or-kill market order by notional value
        Fokmarketbyvalue = 4 => "FOKMARKETBYVALUE",
        Stoploss = 5 => "STOPLOSS",
        Stoplimit = 6 => "STOPLIMIT",
    }
}

proto_enum! {
    pub enum PositionDirection = "seiprotocol.seichain.dex.PositionDirection" {
        Long = 0 => "LONG",
        Short = 1 => "SHORT",
    }
}

proto_enum! {
    /// Who asked for a cancellation
    pub enum CancellationInitiator = "seiprotocol.seichain.dex.CancellationInitiator" {
        User = 0 => "USER",
        Liquidated = 1 => "LIQUIDATED",
    }
}
