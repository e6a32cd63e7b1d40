mod program;
mod rpc;
