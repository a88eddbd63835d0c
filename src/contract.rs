use alloy::sol;

sol! {
    #[sol(rpc)]
    contract SimpleStorage {
        // ========= Events =========
        #[derive(Debug)]
        event NumberChanged(address indexed by, uint256 number);

        // ========= Views =========
        function getMyNumber() external view returns (uint256);

        // ========= User flows =========
        function setMyNumber(uint256 _myNumber) external;
    }
}
