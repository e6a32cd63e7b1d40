mod localnet;
